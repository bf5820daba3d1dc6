//! Provisional label allocation

use ccl_core::{FIRST_LABEL, Label};
use log::warn;

/// Labels above this value trigger a one-time capacity warning
pub const LABEL_WARN_LIMIT: Label = 1 << 24;

/// Hands out consecutive component labels starting at [`FIRST_LABEL`]
///
/// The grid constructor bounds the cell count, so the counter cannot
/// overflow for any grid that exists. Passing [`LABEL_WARN_LIMIT`] is only
/// logged.
#[derive(Debug, Clone)]
pub struct LabelCounter {
    next: Label,
    warned: bool,
}

impl Default for LabelCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelCounter {
    /// Start at [`FIRST_LABEL`]
    pub fn new() -> Self {
        Self {
            next: FIRST_LABEL,
            warned: false,
        }
    }

    /// Return the next unused label
    pub fn mint(&mut self) -> Label {
        let label = self.next;
        if label > LABEL_WARN_LIMIT && !self.warned {
            warn!("label counter passed {}, output may be unreliable", LABEL_WARN_LIMIT);
            self.warned = true;
        }
        self.next += 1;
        label
    }

    /// Number of labels handed out so far
    pub fn minted(&self) -> usize {
        (self.next - FIRST_LABEL) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_sequence() {
        let mut counter = LabelCounter::new();
        assert_eq!(counter.minted(), 0);
        assert_eq!(counter.mint(), 2);
        assert_eq!(counter.mint(), 3);
        assert_eq!(counter.minted(), 2);
    }
}
