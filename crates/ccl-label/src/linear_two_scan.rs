//! Linear two-scan labeling with representative/next/tail tables
//!
//! Each provisional label `m` has three table entries:
//!
//! - `rl[m]` - the current representative of its equivalence class
//! - `next[m]` - the following label in the class list, or none
//! - `tail[m]` - for a representative, the last label of its list
//!
//! A class list always starts at its representative. Merging two classes
//! retargets every member of the absorbed list and splices it onto the
//! keeper's tail in constant time, so after the first scan `rl` already maps
//! every provisional label to its final one and the second scan is a plain
//! table lookup.

use crate::counter::LabelCounter;
use ccl_core::{BACKGROUND, Label, LabelGrid};
use log::debug;

const NONE: Label = BACKGROUND;

/// Equivalence tables indexed by provisional label
///
/// Slots 0 and 1 are padding so labels index directly.
#[derive(Debug, Clone)]
pub struct EquivalenceTables {
    rl: Vec<Label>,
    next: Vec<Label>,
    tail: Vec<Label>,
}

impl Default for EquivalenceTables {
    fn default() -> Self {
        Self::new()
    }
}

impl EquivalenceTables {
    /// Empty tables
    pub fn new() -> Self {
        Self {
            rl: vec![NONE; 2],
            next: vec![NONE; 2],
            tail: vec![NONE; 2],
        }
    }

    /// Register `label` as a new singleton class.
    ///
    /// Labels must be registered in increasing order without gaps.
    pub fn insert(&mut self, label: Label) {
        debug_assert_eq!(label as usize, self.rl.len());
        self.rl.push(label);
        self.next.push(NONE);
        self.tail.push(label);
    }

    /// Current representative of `label`
    #[inline]
    pub fn representative(&self, label: Label) -> Label {
        self.rl[label as usize]
    }

    /// Members of the class whose representative is `rep`, in list order
    pub fn members(&self, rep: Label) -> Vec<Label> {
        let mut out = Vec::new();
        let mut m = rep;
        while m != NONE {
            out.push(m);
            m = self.next[m as usize];
        }
        out
    }

    /// Merge the class of `absorb` into the class of `keep`.
    ///
    /// Walks the absorbed list once to retarget its representatives, then
    /// appends it to the keeper's tail.
    pub fn merge(&mut self, keep: Label, absorb: Label) {
        let keep = self.representative(keep);
        let absorb = self.representative(absorb);
        if keep == absorb {
            return;
        }

        let mut m = absorb;
        while m != NONE {
            self.rl[m as usize] = keep;
            m = self.next[m as usize];
        }

        let keep_tail = self.tail[keep as usize];
        self.next[keep_tail as usize] = absorb;
        self.tail[keep as usize] = self.tail[absorb as usize];
    }
}

/// Label every component of a `{0, 1}` grid in place with the linear
/// two-scan algorithm.
///
/// Final labels are class representatives: unique per component, not
/// consecutive.
pub fn label_linear_two_scan(grid: &mut LabelGrid) {
    let width = grid.width();
    let mut counter = LabelCounter::new();
    let mut tables = EquivalenceTables::new();
    let data = grid.data_mut();

    for i in 0..data.len() {
        if data[i] == BACKGROUND {
            continue;
        }
        let left = if i % width > 0 { data[i - 1] } else { BACKGROUND };
        let up = if i >= width { data[i - width] } else { BACKGROUND };

        data[i] = match (left != BACKGROUND, up != BACKGROUND) {
            (false, false) => {
                let m = counter.mint();
                tables.insert(m);
                m
            }
            (true, false) => left,
            (false, true) => up,
            (true, true) => {
                tables.merge(left, up);
                left
            }
        };
    }

    for cell in data.iter_mut() {
        if *cell != BACKGROUND {
            *cell = tables.representative(*cell);
        }
    }

    debug!("linear two-scan: {} provisional labels", counter.minted());
}
