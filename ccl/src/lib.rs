//! ccl - Connected component labeling of binary grids
//!
//! Umbrella crate over the ccl workspace.
//!
//! # Overview
//!
//! - Label grid model and pixel adapters (crate root)
//! - Labeling strategies and verification ([`label`])
//!
//! # Example
//!
//! ```
//! use ccl::LabelGrid;
//! use ccl::label::{StrategyKind, partition_equivalent, valid_result};
//!
//! let input = LabelGrid::from_rows(&[[1, 0, 1], [1, 0, 1], [1, 1, 1]]).unwrap();
//! let reference = ccl::label::label(StrategyKind::OnePass, &input).unwrap();
//! let fast = ccl::label::label(StrategyKind::LinearTwoScan, &input).unwrap();
//!
//! assert!(valid_result(&fast));
//! assert!(partition_equivalent(&reference, &fast));
//! assert_eq!(fast.distinct_labels().len(), 1);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use ccl_core::*;

// Re-export the labeling crate as a module
pub use ccl_label as label;
