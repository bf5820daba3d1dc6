//! ccl-label - Connected component labeling strategies
//!
//! This crate provides several interchangeable ways to label the
//! 4-connected components of a `{0, 1}` [`LabelGrid`], plus checks that
//! decide whether a labeling is correct:
//!
//! - **One-pass flood fill** - [`label_one_pass`], built on [`explore`]
//! - **Union-find** - [`label_union_find`] with a [`DisjointSet`] forest, and
//!   [`label_union_find_in_place`] with the forest stored in the grid itself
//! - **Linear two-scan** - [`label_linear_two_scan`] with
//!   [`EquivalenceTables`]
//! - **Front/back relaxation** - [`label_front_back`]
//! - **Label propagation** - [`PropagationStrategy`] over a
//!   [`PropagationDevice`], with [`HostDevice`] running on the CPU
//! - **Verification** - [`valid_result`], [`equivalent_result`],
//!   [`partition_equivalent`]
//!
//! Every algorithm can also be driven through the three-phase [`Strategy`]
//! trait, and [`StrategyKind`] enumerates them all.
//!
//! # Example
//!
//! ```
//! use ccl_label::{StrategyKind, label, valid_result};
//! use ccl_label::ccl_core::LabelGrid;
//!
//! let input = LabelGrid::from_rows(&[[1, 1, 0], [0, 0, 1]]).unwrap();
//! for kind in StrategyKind::ALL.into_iter().skip(1) {
//!     let out = label(kind, &input).unwrap();
//!     assert!(valid_result(&out));
//!     assert_eq!(out.distinct_labels().len(), 2);
//! }
//! ```

pub mod counter;
pub mod error;
pub mod explore;
pub mod front_back;
pub mod linear_two_scan;
pub mod onepass;
pub mod propagation;
pub mod strategy;
pub mod union_find;
pub mod verify;

// Re-export core types
pub use ccl_core;
pub use ccl_core::LabelGrid;

pub use counter::{LABEL_WARN_LIMIT, LabelCounter};
pub use error::{LabelError, LabelResult};

pub use explore::explore;
pub use front_back::{FrontBackStats, ScanDirection, label_front_back, label_front_back_with_stats};
pub use linear_two_scan::{EquivalenceTables, label_linear_two_scan};
pub use onepass::label_one_pass;
pub use union_find::{DisjointSet, InPlaceForest, label_union_find, label_union_find_in_place};

pub use propagation::{
    HostDevice, Kernel, PropagationDevice, PropagationOptions, PropagationStrategy,
    run_to_convergence,
};
pub use strategy::{CpuStrategy, LabelFn, Strategy, StrategyKind, label, run_strategy};

pub use verify::{
    Violation, canonicalize, check_equivalent, check_partition, check_result, equivalent_result,
    partition_equivalent, valid_result,
};
