//! One-pass labeling by flood fill
//!
//! A raster scan that consumes each component entirely as soon as its first
//! cell is found. Every cell is relabeled exactly once, so the pass is
//! linear in the grid size. Components are numbered in order of their
//! first cell, starting at 2.
//!
//! This is the simplest strategy and serves as the reference labeling the
//! others are checked against.

use crate::counter::LabelCounter;
use crate::explore::explore_index;
use ccl_core::{LabelGrid, UNLABELED};
use log::debug;

/// Label every component of a `{0, 1}` grid in place.
pub fn label_one_pass(grid: &mut LabelGrid) {
    let mut counter = LabelCounter::new();

    for i in 0..grid.len() {
        if grid.data()[i] == UNLABELED {
            let label = counter.mint();
            explore_index(grid, i, UNLABELED, label);
        }
    }

    debug!("one-pass: {} components", counter.minted());
}
