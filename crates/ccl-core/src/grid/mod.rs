//! LabelGrid - The label container
//!
//! A `LabelGrid` owns a `width * height` buffer of signed labels stored in
//! row-major order: cell `(x, y)` lives at flat index `y * width + x`.
//!
//! # Ownership model
//!
//! The grid exclusively owns its buffer. [`Clone`] produces an independent
//! deep copy. [`LabelGrid::take`] moves the buffer out and leaves the source
//! as the empty zero-sized grid, which is also the [`Default`] value.
//!
//! # Label range
//!
//! Labels are `i32`. Construction rejects grids where `width * height + 2`
//! does not fit, so that every flat index can be stored as a label with the
//! `index + 2` offset used by the in-place union-find.

mod access;
mod convert;

pub use convert::{Rgba, RgbaThreshold, max_if_nonzero, rgb_above_100};

use crate::error::{Error, Result};

/// Label value stored in each cell
pub type Label = i32;

/// Background cell
pub const BACKGROUND: Label = 0;

/// Foreground cell not yet assigned to a component
pub const UNLABELED: Label = 1;

/// Smallest component identifier
pub const FIRST_LABEL: Label = 2;

/// Width x height grid of labels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelGrid {
    width: usize,
    height: usize,
    data: Vec<Label>,
}

impl LabelGrid {
    /// Create a background-filled grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is zero or the
    /// cell count does not fit the label range.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![BACKGROUND; len],
        })
    }

    /// Create a grid from an existing row-major label buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for unusable dimensions and
    /// [`Error::BufferLength`] if `data.len() != width * height`.
    pub fn from_labels(width: usize, height: usize, data: Vec<Label>) -> Result<Self> {
        let len = checked_len(width, height)?;
        if data.len() != len {
            return Err(Error::BufferLength {
                expected: len,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a grid from equally sized rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if there are no rows or the first
    /// row is empty, and [`Error::BufferLength`] if a row differs in length
    /// from the first.
    pub fn from_rows<R: AsRef<[Label]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let len = checked_len(width, height)?;

        let mut data = Vec::with_capacity(len);
        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                return Err(Error::BufferLength {
                    expected: width,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Grid width in cells
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)` pair
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` for the zero-sized grid left behind by [`LabelGrid::take`]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major label buffer
    #[inline]
    pub fn data(&self) -> &[Label] {
        &self.data
    }

    /// Mutable row-major label buffer
    #[inline]
    pub fn data_mut(&mut self) -> &mut [Label] {
        &mut self.data
    }

    /// Consume the grid and return its buffer.
    pub fn into_labels(self) -> Vec<Label> {
        self.data
    }

    /// Move the contents out, leaving `self` as the empty zero-sized grid.
    pub fn take(&mut self) -> LabelGrid {
        std::mem::take(self)
    }

    /// Reset every cell to background.
    pub fn clear(&mut self) {
        self.data.fill(BACKGROUND);
    }

    /// Check that `other` has the same dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] otherwise.
    pub fn ensure_same_size(&self, other: &LabelGrid) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(())
    }

    /// Number of non-background cells
    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != BACKGROUND).count()
    }

    /// Largest label present, or `None` if every cell is background
    pub fn max_label(&self) -> Option<Label> {
        self.data.iter().copied().filter(|&v| v != BACKGROUND).max()
    }

    /// Sorted list of the distinct non-background labels
    pub fn distinct_labels(&self) -> Vec<Label> {
        let mut labels: Vec<Label> = self
            .data
            .iter()
            .copied()
            .filter(|&v| v != BACKGROUND)
            .collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }
}

fn checked_len(width: usize, height: usize) -> Result<usize> {
    let invalid = Error::InvalidDimension { width, height };
    if width == 0 || height == 0 {
        return Err(invalid);
    }
    let len = width.checked_mul(height).ok_or(invalid.clone())?;
    match len.checked_add(2) {
        Some(top) if top <= Label::MAX as usize => Ok(len),
        _ => Err(invalid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_background() {
        let grid = LabelGrid::new(5, 3).unwrap();
        assert_eq!(grid.dimensions(), (5, 3));
        assert_eq!(grid.len(), 15);
        assert!(grid.data().iter().all(|&v| v == BACKGROUND));
        assert_eq!(grid.max_label(), None);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            LabelGrid::new(0, 4),
            Err(Error::InvalidDimension {
                width: 0,
                height: 4
            })
        );
        assert!(LabelGrid::new(4, 0).is_err());
    }

    #[test]
    fn test_oversized_rejected() {
        assert!(LabelGrid::new(1 << 16, 1 << 15).is_err());
        assert!(LabelGrid::new(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_from_labels_length_checked() {
        let err = LabelGrid::from_labels(2, 2, vec![0, 1, 1]).unwrap_err();
        assert_eq!(
            err,
            Error::BufferLength {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_from_rows_ragged() {
        let rows: Vec<Vec<Label>> = vec![vec![0, 1], vec![1]];
        assert!(LabelGrid::from_rows(&rows).is_err());
        let empty: Vec<Vec<Label>> = Vec::new();
        assert!(LabelGrid::from_rows(&empty).is_err());
    }

    #[test]
    fn test_clone_is_deep() {
        let original = LabelGrid::from_rows(&[[1, 0], [0, 1]]).unwrap();
        let mut copy = original.clone();
        copy.data_mut()[0] = 7;
        assert_eq!(original.data()[0], 1);
        assert_eq!(copy.data()[0], 7);
    }

    #[test]
    fn test_take_leaves_empty() {
        let mut source = LabelGrid::from_rows(&[[1, 1, 0]]).unwrap();
        let moved = source.take();
        assert_eq!(moved.dimensions(), (3, 1));
        assert_eq!(moved.data(), &[1, 1, 0]);
        assert!(source.is_empty());
        assert_eq!(source.dimensions(), (0, 0));
    }

    #[test]
    fn test_clear() {
        let mut grid = LabelGrid::from_rows(&[[2, 3], [4, 0]]).unwrap();
        grid.clear();
        assert_eq!(grid.foreground_count(), 0);
        assert_eq!(grid.dimensions(), (2, 2));
    }

    #[test]
    fn test_label_statistics() {
        let grid = LabelGrid::from_rows(&[[5, 0, 2], [5, 0, 9]]).unwrap();
        assert_eq!(grid.foreground_count(), 4);
        assert_eq!(grid.max_label(), Some(9));
        assert_eq!(grid.distinct_labels(), vec![2, 5, 9]);
    }
}
