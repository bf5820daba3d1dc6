//! Algorithm-agnostic correctness checks
//!
//! - [`valid_result`] / [`check_result`] - a labeling is internally
//!   consistent: no sentinel left, adjacent foreground cells agree, and no
//!   label is shared by two disjoint components.
//! - [`equivalent_result`] / [`check_equivalent`] - two labelings agree on
//!   which cells are foreground.
//! - [`partition_equivalent`] / [`check_partition`] - two labelings describe
//!   the same components, whatever numbers they use.
//!
//! `equivalent_result` compares foreground/background only; the
//! partition check is the stronger, separate test. None of the checks
//! modify their inputs.

use crate::counter::LABEL_WARN_LIMIT;
use crate::explore::explore_index;
use ccl_core::{BACKGROUND, FIRST_LABEL, Label, LabelGrid, UNLABELED};
use log::warn;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Reason a labeling failed a check
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// A cell still holds the unlabeled sentinel
    #[error("unlabeled cell at x:{x} y:{y}")]
    Unlabeled { x: usize, y: usize },

    /// Two 4-adjacent foreground cells carry different labels
    #[error("connected cells with different labels at x:{x} y:{y}")]
    CloseFault { x: usize, y: usize },

    /// Two disjoint components use the same label
    #[error("multiple components with label {label}, second one at x:{x} y:{y}")]
    DuplicateLabel { label: Label, x: usize, y: usize },

    /// The grids have different dimensions
    #[error("mismatched sizes: {}x{} vs {}x{}", .left.0, .left.1, .right.0, .right.1)]
    SizeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    /// A cell is foreground in one labeling and background in the other
    #[error("component on one labeling but none on the other at x:{x} y:{y}")]
    ForegroundMismatch { x: usize, y: usize },

    /// The labelings group cells into different components
    #[error("labelings disagree on components at x:{x} y:{y}")]
    PartitionMismatch { x: usize, y: usize },
}

/// Check a completed labeling for internal consistency.
///
/// Labels above [`LABEL_WARN_LIMIT`] are logged but do not fail the check.
///
/// # Errors
///
/// Returns the first [`Violation`] found in raster order. Sentinel and
/// adjacency faults are reported before duplicate labels, and a sentinel
/// is reported at its own position rather than as a neighbor's fault.
pub fn check_result(grid: &LabelGrid) -> Result<(), Violation> {
    let (w, h) = grid.dimensions();
    let d = grid.data();
    let mut capacity_warned = false;

    for y in 0..h {
        for x in 0..w {
            let i = y * w + x;
            let cur = d[i];

            if cur > LABEL_WARN_LIMIT && !capacity_warned {
                warn!("label {} above {}", cur, LABEL_WARN_LIMIT);
                capacity_warned = true;
            }

            if cur == UNLABELED {
                return Err(Violation::Unlabeled { x, y });
            }

            if cur != BACKGROUND {
                let close_fault = grid
                    .neighbors4(i)
                    .map(|n| d[n])
                    .any(|v| v != BACKGROUND && v != UNLABELED && v != cur);
                if close_fault {
                    return Err(Violation::CloseFault { x, y });
                }
            }
        }
    }

    let mut scratch = grid.clone();
    let mut seen: HashSet<Label> = HashSet::new();
    for i in 0..scratch.len() {
        let cur = scratch.data()[i];
        if cur == BACKGROUND {
            continue;
        }
        if !seen.insert(cur) {
            let (x, y) = scratch.coords(i);
            return Err(Violation::DuplicateLabel { label: cur, x, y });
        }
        explore_index(&mut scratch, i, cur, BACKGROUND);
    }

    Ok(())
}

/// `true` if `grid` passes [`check_result`]. Violations are logged.
pub fn valid_result(grid: &LabelGrid) -> bool {
    match check_result(grid) {
        Ok(()) => true,
        Err(v) => {
            warn!("invalid labeling: {}", v);
            false
        }
    }
}

fn ensure_same_size(a: &LabelGrid, b: &LabelGrid) -> Result<(), Violation> {
    if a.dimensions() != b.dimensions() {
        return Err(Violation::SizeMismatch {
            left: a.dimensions(),
            right: b.dimensions(),
        });
    }
    Ok(())
}

/// Check that two labelings agree cell by cell on foreground/background.
///
/// This does not compare which cells are grouped together; see
/// [`check_partition`] for that.
///
/// # Errors
///
/// Returns [`Violation::SizeMismatch`] or the first
/// [`Violation::ForegroundMismatch`].
pub fn check_equivalent(a: &LabelGrid, b: &LabelGrid) -> Result<(), Violation> {
    ensure_same_size(a, b)?;

    let mismatch = a
        .data()
        .iter()
        .zip(b.data())
        .position(|(&la, &lb)| (la == BACKGROUND) != (lb == BACKGROUND));

    match mismatch {
        Some(i) => {
            let (x, y) = a.coords(i);
            Err(Violation::ForegroundMismatch { x, y })
        }
        None => Ok(()),
    }
}

/// `true` if `a` and `b` pass [`check_equivalent`]. Violations are logged.
pub fn equivalent_result(a: &LabelGrid, b: &LabelGrid) -> bool {
    match check_equivalent(a, b) {
        Ok(()) => true,
        Err(v) => {
            warn!("labelings not equivalent: {}", v);
            false
        }
    }
}

/// Check that two labelings induce the same partition of the foreground.
///
/// Labels are matched through a bijection built on the fly, so any
/// renumbering is accepted but a split or merged component is not.
///
/// # Errors
///
/// Returns [`Violation::SizeMismatch`], [`Violation::ForegroundMismatch`]
/// or [`Violation::PartitionMismatch`] for the first disagreeing cell.
pub fn check_partition(a: &LabelGrid, b: &LabelGrid) -> Result<(), Violation> {
    ensure_same_size(a, b)?;

    let mut forward: HashMap<Label, Label> = HashMap::new();
    let mut backward: HashMap<Label, Label> = HashMap::new();

    for (i, (&la, &lb)) in a.data().iter().zip(b.data()).enumerate() {
        match (la == BACKGROUND, lb == BACKGROUND) {
            (true, true) => continue,
            (false, false) => {}
            _ => {
                let (x, y) = a.coords(i);
                return Err(Violation::ForegroundMismatch { x, y });
            }
        }

        let fwd = *forward.entry(la).or_insert(lb);
        let bwd = *backward.entry(lb).or_insert(la);
        if fwd != lb || bwd != la {
            let (x, y) = a.coords(i);
            return Err(Violation::PartitionMismatch { x, y });
        }
    }

    Ok(())
}

/// `true` if `a` and `b` pass [`check_partition`]. Violations are logged.
pub fn partition_equivalent(a: &LabelGrid, b: &LabelGrid) -> bool {
    match check_partition(a, b) {
        Ok(()) => true,
        Err(v) => {
            warn!("labelings partition differently: {}", v);
            false
        }
    }
}

/// Renumber labels in order of first appearance, starting at 2.
///
/// Two labelings describe the same partition exactly when their canonical
/// forms are equal.
pub fn canonicalize(grid: &LabelGrid) -> LabelGrid {
    let mut out = grid.clone();
    let mut mapping: HashMap<Label, Label> = HashMap::new();
    let mut next = FIRST_LABEL;

    for cell in out.data_mut() {
        if *cell == BACKGROUND {
            continue;
        }
        *cell = *mapping.entry(*cell).or_insert_with(|| {
            let label = next;
            next += 1;
            label
        });
    }

    out
}
