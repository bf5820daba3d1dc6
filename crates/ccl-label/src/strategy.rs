//! Uniform strategy contract and registry
//!
//! Every labeling algorithm is driven through the same three phases so a
//! benchmark can time [`Strategy::run`] apart from data movement:
//!
//! 1. [`Strategy::accept_input`] - copy the `{0, 1}` grid in (CPU
//!    strategies) or upload it to a device
//! 2. [`Strategy::run`] - compute labels
//! 3. [`Strategy::retrieve_output`] - hand the labeled grid back
//!
//! The caller's grid is never mutated. [`StrategyKind`] lists every
//! available variant and builds them.

use crate::error::{LabelError, LabelResult};
use crate::front_back::label_front_back;
use crate::linear_two_scan::label_linear_two_scan;
use crate::onepass::label_one_pass;
use crate::propagation::{Kernel, PropagationOptions, PropagationStrategy};
use crate::union_find::{label_union_find, label_union_find_in_place};
use ccl_core::LabelGrid;
use std::fmt;
use std::str::FromStr;

/// Three-phase labeling contract
pub trait Strategy {
    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Take a private copy of (or upload) the input grid.
    fn accept_input(&mut self, input: &LabelGrid) -> LabelResult<()>;

    /// Run the algorithm to completion.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::NoInput`] if no input was accepted.
    fn run(&mut self) -> LabelResult<()>;

    /// Hand back the result, leaving the strategy without input.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::NoInput`] if no input was accepted.
    fn retrieve_output(&mut self) -> LabelResult<LabelGrid>;
}

/// In-place labeling function over a private grid
pub type LabelFn = fn(&mut LabelGrid);

/// Strategy that runs a CPU labeling function on its own copy of the input
pub struct CpuStrategy {
    name: &'static str,
    algorithm: LabelFn,
    grid: Option<LabelGrid>,
}

impl CpuStrategy {
    /// Wrap a labeling function
    pub fn new(name: &'static str, algorithm: LabelFn) -> Self {
        Self {
            name,
            algorithm,
            grid: None,
        }
    }
}

impl Strategy for CpuStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn accept_input(&mut self, input: &LabelGrid) -> LabelResult<()> {
        self.grid = Some(input.clone());
        Ok(())
    }

    fn run(&mut self) -> LabelResult<()> {
        let grid = self.grid.as_mut().ok_or(LabelError::NoInput)?;
        (self.algorithm)(grid);
        Ok(())
    }

    fn retrieve_output(&mut self) -> LabelResult<LabelGrid> {
        self.grid.take().ok_or(LabelError::NoInput)
    }
}

fn identity(_grid: &mut LabelGrid) {}

/// Every available strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// Returns the input unchanged, for checking thresholding and harnesses
    Identity,
    /// Flood-fill one-pass
    OnePass,
    /// Two-pass union-find with a disjoint-set forest
    UnionFind,
    /// Two-pass union-find encoded in the label buffer
    UnionFindInPlace,
    /// Linear two-scan with representative/next/tail tables
    LinearTwoScan,
    /// Iterated backward/forward relaxation
    FrontBack,
    /// Host-emulated device, nearest-neighbor propagation
    NeighbourPropagation,
    /// Host-emulated device, run-length propagation
    PlusPropagation,
}

impl StrategyKind {
    /// All strategies in registry order
    pub const ALL: [StrategyKind; 8] = [
        StrategyKind::Identity,
        StrategyKind::OnePass,
        StrategyKind::UnionFind,
        StrategyKind::UnionFindInPlace,
        StrategyKind::LinearTwoScan,
        StrategyKind::FrontBack,
        StrategyKind::NeighbourPropagation,
        StrategyKind::PlusPropagation,
    ];

    /// The sequential CPU labeling algorithms
    pub const CPU: [StrategyKind; 5] = [
        StrategyKind::OnePass,
        StrategyKind::UnionFind,
        StrategyKind::UnionFindInPlace,
        StrategyKind::LinearTwoScan,
        StrategyKind::FrontBack,
    ];

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Identity => "Identity",
            StrategyKind::OnePass => "CPU one-pass",
            StrategyKind::UnionFind => "CPU union-find",
            StrategyKind::UnionFindInPlace => "CPU union-find in-place",
            StrategyKind::LinearTwoScan => "CPU linear two-scan",
            StrategyKind::FrontBack => "CPU front back scan",
            StrategyKind::NeighbourPropagation => "Host neighbour propagation",
            StrategyKind::PlusPropagation => "Host plus propagation",
        }
    }

    /// Short identifier accepted by [`FromStr`]
    pub fn key(self) -> &'static str {
        match self {
            StrategyKind::Identity => "identity",
            StrategyKind::OnePass => "one-pass",
            StrategyKind::UnionFind => "union-find",
            StrategyKind::UnionFindInPlace => "union-find-in-place",
            StrategyKind::LinearTwoScan => "linear-two-scan",
            StrategyKind::FrontBack => "front-back",
            StrategyKind::NeighbourPropagation => "neighbour-propagation",
            StrategyKind::PlusPropagation => "plus-propagation",
        }
    }

    /// In-place labeling function, for the CPU variants
    pub fn label_fn(self) -> Option<LabelFn> {
        match self {
            StrategyKind::Identity => Some(identity),
            StrategyKind::OnePass => Some(label_one_pass),
            StrategyKind::UnionFind => Some(label_union_find),
            StrategyKind::UnionFindInPlace => Some(label_union_find_in_place),
            StrategyKind::LinearTwoScan => Some(label_linear_two_scan),
            StrategyKind::FrontBack => Some(label_front_back),
            StrategyKind::NeighbourPropagation | StrategyKind::PlusPropagation => None,
        }
    }

    /// Build a fresh strategy instance
    pub fn create(self) -> Box<dyn Strategy> {
        let kernel = match self {
            StrategyKind::NeighbourPropagation => Kernel::Neighbour,
            StrategyKind::PlusPropagation => Kernel::Plus,
            cpu => {
                // every non-device variant has a labeling function
                let algorithm = cpu.label_fn().unwrap_or(identity);
                return Box::new(CpuStrategy::new(cpu.name(), algorithm));
            }
        };
        Box::new(PropagationStrategy::host(&PropagationOptions::new(kernel)))
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = LabelError;

    /// Accepts either the key or the display name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        StrategyKind::ALL
            .into_iter()
            .find(|k| k.key().eq_ignore_ascii_case(wanted) || k.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| LabelError::UnknownStrategy(s.to_string()))
    }
}

/// Run all three phases of `strategy` on `input`.
pub fn run_strategy(strategy: &mut dyn Strategy, input: &LabelGrid) -> LabelResult<LabelGrid> {
    strategy.accept_input(input)?;
    strategy.run()?;
    strategy.retrieve_output()
}

/// Label a copy of `input` with the given strategy.
pub fn label(kind: StrategyKind, input: &LabelGrid) -> LabelResult<LabelGrid> {
    let mut strategy = kind.create();
    run_strategy(strategy.as_mut(), input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_and_keys_unique() {
        for (i, a) in StrategyKind::ALL.iter().enumerate() {
            for b in &StrategyKind::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
                assert_ne!(a.key(), b.key());
            }
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "front-back".parse::<StrategyKind>().unwrap(),
            StrategyKind::FrontBack
        );
        assert_eq!(
            "cpu ONE-PASS".parse::<StrategyKind>().unwrap(),
            StrategyKind::OnePass
        );
        assert!(matches!(
            "quantum".parse::<StrategyKind>(),
            Err(LabelError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn test_create_uses_display_name() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.create().name(), kind.name());
            assert_eq!(kind.to_string(), kind.name());
        }
    }

    #[test]
    fn test_cpu_strategy_does_not_touch_input() {
        let input = LabelGrid::from_rows(&[[1, 1], [0, 1]]).unwrap();
        let out = label(StrategyKind::OnePass, &input).unwrap();
        assert_eq!(input.data(), &[1, 1, 0, 1]);
        assert_eq!(out.data(), &[2, 2, 0, 2]);
    }

    #[test]
    fn test_identity() {
        let input = LabelGrid::from_rows(&[[1, 0, 1]]).unwrap();
        assert_eq!(label(StrategyKind::Identity, &input).unwrap(), input);
    }

    #[test]
    fn test_phases_out_of_order() {
        let mut strategy = StrategyKind::UnionFind.create();
        assert!(matches!(strategy.run(), Err(LabelError::NoInput)));
        let input = LabelGrid::from_rows(&[[1]]).unwrap();
        let out = run_strategy(strategy.as_mut(), &input).unwrap();
        assert_eq!(out.data(), &[2]);
        assert!(matches!(
            strategy.retrieve_output(),
            Err(LabelError::NoInput)
        ));
    }
}
