//! Grid fixtures
//!
//! ASCII-art grids use `#` for unlabeled foreground and `.` for background.
//! Digits stand for themselves, so expected labelings can be written the
//! same way.

use crate::error::{TestError, TestResult};
use ccl_core::{BACKGROUND, Label, LabelGrid, UNLABELED};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Parse an ASCII-art grid.
///
/// Leading and trailing whitespace on each line is ignored, as are blank
/// lines, so fixtures can be indented inside raw string literals.
///
/// # Errors
///
/// Returns [`TestError::FixtureChar`] for characters other than `#`, `.`
/// and digits, and [`TestError::Grid`] for empty or ragged input.
pub fn parse_grid(text: &str) -> TestResult<LabelGrid> {
    let mut rows: Vec<Vec<Label>> = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut row = Vec::with_capacity(line.len());
        for (column, ch) in line.chars().enumerate() {
            let label = match ch {
                '.' => BACKGROUND,
                '#' => UNLABELED,
                d if d.is_ascii_digit() => d as Label - '0' as Label,
                _ => {
                    return Err(TestError::FixtureChar {
                        ch,
                        line: line_no + 1,
                        column: column + 1,
                    });
                }
            };
            row.push(label);
        }
        rows.push(row);
    }

    Ok(LabelGrid::from_rows(&rows)?)
}

fn filled(width: usize, height: usize, value: Label) -> LabelGrid {
    let mut grid = LabelGrid::new(width, height)
        .unwrap_or_else(|e| panic!("fixture {}x{}: {}", width, height, e));
    grid.data_mut().fill(value);
    grid
}

/// Every cell unlabeled foreground
pub fn all_foreground(width: usize, height: usize) -> LabelGrid {
    filled(width, height, UNLABELED)
}

/// Every cell background
pub fn all_background(width: usize, height: usize) -> LabelGrid {
    filled(width, height, BACKGROUND)
}

/// Two single cells touching only at a corner
pub fn diagonal_pair() -> LabelGrid {
    let mut grid = all_background(2, 2);
    grid.set_unchecked(0, 0, UNLABELED);
    grid.set_unchecked(1, 1, UNLABELED);
    grid
}

/// Two 3x3 blocks joined by a one-cell bridge
///
/// ```text
/// ###.###
/// #######
/// ###.###
/// ```
pub fn hourglass() -> LabelGrid {
    let mut grid = all_foreground(7, 3);
    grid.set_unchecked(3, 0, BACKGROUND);
    grid.set_unchecked(3, 2, BACKGROUND);
    grid
}

/// Alternating foreground cells, so every foreground cell is isolated
pub fn checkerboard(width: usize, height: usize) -> LabelGrid {
    let mut grid = all_background(width, height);
    for y in 0..height {
        for x in 0..width {
            if (x + y) % 2 == 0 {
                grid.set_unchecked(x, y, UNLABELED);
            }
        }
    }
    grid
}

/// `teeth` vertical bars of height `length` hanging from a shared bottom bar.
///
/// Every tooth gets its own provisional label in a raster scan and only
/// merges on the last row.
pub fn comb(teeth: usize, length: usize) -> LabelGrid {
    let width = teeth * 2 - 1;
    let height = length + 1;
    let mut grid = all_background(width, height);
    for x in (0..width).step_by(2) {
        for y in 0..length {
            grid.set_unchecked(x, y, UNLABELED);
        }
    }
    for x in 0..width {
        grid.set_unchecked(x, length, UNLABELED);
    }
    grid
}

/// A single path that snakes down the grid, row by row
///
/// ```text
/// #####
/// ....#
/// #####
/// #....
/// #####
/// ```
pub fn serpentine(width: usize, turns: usize) -> LabelGrid {
    let height = turns * 2 + 1;
    let mut grid = all_background(width, height);
    for y in (0..height).step_by(2) {
        for x in 0..width {
            grid.set_unchecked(x, y, UNLABELED);
        }
    }
    for turn in 0..turns {
        let x = if turn % 2 == 0 { width - 1 } else { 0 };
        grid.set_unchecked(x, turn * 2 + 1, UNLABELED);
    }
    grid
}

/// Seeded random binary grid with the given foreground density
pub fn random_grid(width: usize, height: usize, density: f64, seed: u64) -> LabelGrid {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = all_background(width, height);
    for cell in grid.data_mut() {
        if rng.random_bool(density) {
            *cell = UNLABELED;
        }
    }
    grid
}
