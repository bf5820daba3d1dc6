//! Flood-fill relabeling
//!
//! [`explore`] relabels the 4-connected region that holds `from` around a
//! seed cell. It uses an explicit stack instead of recursion: a single
//! component may cover the whole grid.

use crate::error::{LabelError, LabelResult};
use ccl_core::{Label, LabelGrid};

/// Relabel the `from`-region containing `(x0, y0)` to `to`.
///
/// If the seed does not hold `from` (or `from == to`) nothing is touched.
/// Otherwise every cell reachable from the seed through 4-adjacent cells
/// holding `from` is set to `to`, and no other cell changes. Traversal
/// order is unspecified.
///
/// # Returns
///
/// The number of cells relabeled.
///
/// # Errors
///
/// Returns [`LabelError::InvalidSeed`] if the seed is outside the grid.
pub fn explore(
    grid: &mut LabelGrid,
    x0: usize,
    y0: usize,
    from: Label,
    to: Label,
) -> LabelResult<usize> {
    if !grid.contains(x0, y0) {
        return Err(LabelError::InvalidSeed { x: x0, y: y0 });
    }
    let seed = grid.index(x0, y0);
    Ok(explore_index(grid, seed, from, to))
}

/// [`explore`] from a flat index that the caller knows is in bounds.
pub(crate) fn explore_index(grid: &mut LabelGrid, seed: usize, from: Label, to: Label) -> usize {
    if from == to || grid.data()[seed] != from {
        return 0;
    }

    grid.data_mut()[seed] = to;
    let mut filled = 1;
    let mut stack = vec![seed];

    while let Some(i) = stack.pop() {
        for n in grid.neighbors4(i) {
            let cell = &mut grid.data_mut()[n];
            if *cell == from {
                *cell = to;
                filled += 1;
                stack.push(n);
            }
        }
    }

    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[Label]]) -> LabelGrid {
        LabelGrid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_explore_region_only() {
        let mut g = grid(&[&[1, 1, 0, 1], &[0, 1, 0, 1], &[1, 1, 0, 0]]);
        let n = explore(&mut g, 0, 0, 1, 5).unwrap();
        assert_eq!(n, 5);
        assert_eq!(g.data(), &[5, 5, 0, 1, 0, 5, 0, 1, 5, 5, 0, 0]);
    }

    #[test]
    fn test_explore_not_from_is_noop() {
        let mut g = grid(&[&[0, 1], &[1, 1]]);
        let before = g.clone();
        assert_eq!(explore(&mut g, 0, 0, 1, 4).unwrap(), 0);
        assert_eq!(g, before);
    }

    #[test]
    fn test_explore_same_label_is_noop() {
        let mut g = grid(&[&[3, 3]]);
        assert_eq!(explore(&mut g, 0, 0, 3, 3).unwrap(), 0);
        assert_eq!(g.data(), &[3, 3]);
    }

    #[test]
    fn test_explore_diagonal_does_not_connect() {
        let mut g = grid(&[&[1, 0], &[0, 1]]);
        explore(&mut g, 0, 0, 1, 2).unwrap();
        assert_eq!(g.data(), &[2, 0, 0, 1]);
    }

    #[test]
    fn test_explore_repeat_is_noop() {
        let mut g = grid(&[&[1, 1], &[1, 0]]);
        assert_eq!(explore(&mut g, 1, 0, 1, 9).unwrap(), 3);
        let after = g.clone();
        assert_eq!(explore(&mut g, 1, 0, 1, 9).unwrap(), 0);
        assert_eq!(g, after);
    }

    #[test]
    fn test_explore_invalid_seed() {
        let mut g = grid(&[&[1]]);
        assert!(matches!(
            explore(&mut g, 1, 0, 1, 2),
            Err(LabelError::InvalidSeed { x: 1, y: 0 })
        ));
    }

    #[test]
    fn test_explore_large_component() {
        let mut g = LabelGrid::new(512, 512).unwrap();
        g.data_mut().fill(1);
        let n = explore(&mut g, 256, 256, 1, 2).unwrap();
        assert_eq!(n, 512 * 512);
        assert!(g.data().iter().all(|&v| v == 2));
    }
}
