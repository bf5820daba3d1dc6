//! Multi-pass front/back relaxation labeling
//!
//! A first forward raster scan assigns provisional labels from the left and
//! upper neighbors and fills a label connection table `T` that maps each
//! label to the smallest label known to be equivalent. After that, pairs of
//! scans (backward, then forward) repeat until a pair changes nothing.
//!
//! In each scan a foreground cell takes
//! `m = min(T[own], T[trailing neighbors])`, where the trailing neighbors
//! are right and down on a backward scan and left and up on a forward scan.
//! The cell and every table entry involved are lowered to `m`. Labels only
//! decrease and are bounded below by 2, so the iteration terminates.

use crate::counter::LabelCounter;
use ccl_core::{BACKGROUND, Label, LabelGrid};
use log::debug;

/// Direction of a raster scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    /// Top-left to bottom-right
    Forward,
    /// Bottom-right to top-left
    Backward,
}

/// Outcome of [`label_front_back_with_stats`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontBackStats {
    /// Labels handed out by the initial scan
    pub provisional_labels: usize,
    /// Backward+forward pairs run, including the final unchanged one
    pub iterations: usize,
}

/// Label every component of a `{0, 1}` grid in place by front/back
/// relaxation.
pub fn label_front_back(grid: &mut LabelGrid) {
    label_front_back_with_stats(grid);
}

/// [`label_front_back`], also reporting how much work it took
pub fn label_front_back_with_stats(grid: &mut LabelGrid) -> FrontBackStats {
    let width = grid.width();
    let data = grid.data_mut();
    let mut counter = LabelCounter::new();
    let mut table: Vec<Label> = vec![BACKGROUND; 2];

    for i in 0..data.len() {
        if data[i] == BACKGROUND {
            continue;
        }
        let left = if i % width > 0 { data[i - 1] } else { BACKGROUND };
        let up = if i >= width { data[i - width] } else { BACKGROUND };

        data[i] = match (left != BACKGROUND, up != BACKGROUND) {
            (false, false) => {
                let m = counter.mint();
                table.push(m);
                m
            }
            (true, false) => table[left as usize],
            (false, true) => table[up as usize],
            (true, true) => {
                let m = table[left as usize].min(table[up as usize]);
                table[left as usize] = m;
                table[up as usize] = m;
                m
            }
        };
    }

    let mut iterations = 0;
    loop {
        iterations += 1;
        let mut changed = relax(data, &mut table, width, ScanDirection::Backward);
        changed |= relax(data, &mut table, width, ScanDirection::Forward);
        if !changed {
            break;
        }
    }

    debug!(
        "front-back: {} provisional labels, {} iterations",
        counter.minted(),
        iterations
    );

    FrontBackStats {
        provisional_labels: counter.minted(),
        iterations,
    }
}

/// One relaxation scan. Returns `true` if any cell or table entry changed.
fn relax(data: &mut [Label], table: &mut [Label], width: usize, dir: ScanDirection) -> bool {
    let len = data.len();
    let mut changed = false;

    let mut visit = |i: usize| {
        let own = data[i];
        if own == BACKGROUND {
            return;
        }
        let x = i % width;
        let trailing = match dir {
            ScanDirection::Backward => [
                (x + 1 < width).then(|| i + 1),
                (i + width < len).then(|| i + width),
            ],
            ScanDirection::Forward => [(x > 0).then(|| i - 1), (i >= width).then(|| i - width)],
        };
        let neighbors = trailing
            .into_iter()
            .flatten()
            .map(|n| data[n])
            .filter(|&v| v != BACKGROUND);

        let mut labels = [own, BACKGROUND, BACKGROUND];
        let mut count = 1;
        for v in neighbors {
            labels[count] = v;
            count += 1;
        }

        let m = labels[..count]
            .iter()
            .map(|&l| table[l as usize])
            .min()
            .unwrap_or(own);

        for &l in &labels[..count] {
            if table[l as usize] != m {
                table[l as usize] = m;
                changed = true;
            }
        }
        if own != m {
            data[i] = m;
            changed = true;
        }
    };

    match dir {
        ScanDirection::Forward => (0..len).for_each(&mut visit),
        ScanDirection::Backward => (0..len).rev().for_each(&mut visit),
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_back_u_shape() {
        let mut grid = LabelGrid::from_rows(&[[1, 0, 1], [1, 0, 1], [1, 1, 1]]).unwrap();
        let stats = label_front_back_with_stats(&mut grid);
        assert_eq!(stats.provisional_labels, 2);
        assert_eq!(grid.distinct_labels(), vec![2]);
    }

    #[test]
    fn test_front_back_keeps_components_apart() {
        let mut grid = LabelGrid::from_rows(&[[1, 1, 0, 1], [0, 0, 0, 1], [1, 0, 1, 1]]).unwrap();
        label_front_back(&mut grid);
        assert_eq!(grid.data(), &[2, 2, 0, 3, 0, 0, 0, 3, 4, 0, 3, 3]);
    }

    #[test]
    fn test_front_back_staircase_needs_relaxation() {
        // a mirrored staircase merges late labels back into early ones
        let mut grid = LabelGrid::from_rows(&[
            [0, 0, 0, 1],
            [0, 0, 1, 1],
            [0, 1, 1, 0],
            [1, 1, 0, 0],
        ])
        .unwrap();
        let stats = label_front_back_with_stats(&mut grid);
        assert!(stats.iterations >= 1);
        assert_eq!(grid.distinct_labels().len(), 1);
    }

    #[test]
    fn test_front_back_empty_grid() {
        let mut grid = LabelGrid::new(3, 3).unwrap();
        let stats = label_front_back_with_stats(&mut grid);
        assert_eq!(stats.provisional_labels, 0);
        assert_eq!(stats.iterations, 1);
    }
}
