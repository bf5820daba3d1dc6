//! ccl-core - Label grid data model
//!
//! This crate provides the data structures shared by every labeling
//! strategy:
//!
//! - [`LabelGrid`] - A width x height row-major buffer of integer labels
//! - [`Label`] and the label constants [`BACKGROUND`], [`UNLABELED`],
//!   [`FIRST_LABEL`]
//! - [`RgbaThreshold`] / [`Rgba`] - Adapters to and from 4-channel pixels
//!
//! # Label semantics
//!
//! | value | meaning |
//! |-------|---------|
//! | `0`   | background, never overwritten by labeling |
//! | `1`   | foreground that has not been assigned a component yet |
//! | `>=2` | component identifier |
//!
//! # Example
//!
//! ```
//! use ccl_core::{LabelGrid, UNLABELED};
//!
//! let mut grid = LabelGrid::new(4, 3).unwrap();
//! grid.set(1, 1, UNLABELED).unwrap();
//! assert_eq!(grid.foreground_count(), 1);
//! ```

pub mod error;
pub mod grid;

pub use error::{Error, Result};
pub use grid::{
    BACKGROUND, FIRST_LABEL, Label, LabelGrid, Rgba, RgbaThreshold, UNLABELED, max_if_nonzero,
    rgb_above_100,
};
