//! Cell access functions
//!
//! Coordinate-based getters and setters plus row views. Flat-index access
//! goes through [`LabelGrid::data`] / [`LabelGrid::data_mut`].

use super::{Label, LabelGrid};
use crate::error::{Error, Result};

impl LabelGrid {
    /// Flat index of `(x, y)`.
    ///
    /// Does not check bounds.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// `(x, y)` of a flat index
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    /// `true` if `(x, y)` is inside the grid
    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Get the label at `(x, y)`.
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<Label> {
        if self.contains(x, y) {
            Some(self.data[self.index(x, y)])
        } else {
            None
        }
    }

    /// Get the label at `(x, y)` without a bounds result.
    ///
    /// # Panics
    ///
    /// Panics if the flat index is outside the buffer.
    #[inline]
    pub fn get_unchecked(&self, x: usize, y: usize) -> Label {
        self.data[self.index(x, y)]
    }

    /// Set the label at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set(&mut self, x: usize, y: usize, label: Label) -> Result<()> {
        if !self.contains(x, y) {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let i = self.index(x, y);
        self.data[i] = label;
        Ok(())
    }

    /// Set the label at `(x, y)` without a bounds result.
    ///
    /// # Panics
    ///
    /// Panics if the flat index is outside the buffer.
    #[inline]
    pub fn set_unchecked(&mut self, x: usize, y: usize, label: Label) {
        let i = self.index(x, y);
        self.data[i] = label;
    }

    /// Row `y` as a slice, or `None` if out of bounds
    pub fn row(&self, y: usize) -> Option<&[Label]> {
        if y < self.height {
            let start = y * self.width;
            Some(&self.data[start..start + self.width])
        } else {
            None
        }
    }

    /// Iterate over rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Label]> {
        // chunks_exact panics on 0, which only the empty grid has
        self.data.chunks_exact(self.width.max(1))
    }

    /// Flat indices of the 4-connected neighbors of `index`.
    ///
    /// Order is right, left, down, up. The iterator does not borrow the
    /// grid, so cells may be written while it is consumed.
    pub fn neighbors4(&self, index: usize) -> impl Iterator<Item = usize> + use<> {
        let (x, y) = self.coords(index);
        let (w, h) = (self.width, self.height);
        [
            (x + 1 < w).then(|| index + 1),
            (x > 0).then(|| index - 1),
            (y + 1 < h).then(|| index + w),
            (y > 0).then(|| index - w),
        ]
        .into_iter()
        .flatten()
    }
}
