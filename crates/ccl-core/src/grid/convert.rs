//! Conversions between label grids and 4-channel pixel buffers
//!
//! Image decoding happens elsewhere. This module only sees interleaved
//! `r, g, b, a` byte buffers: one direction thresholds them into a
//! `{0, 1}` grid through an injected predicate, the other renders labels
//! back through an injected `label -> Rgba` function.

use super::{BACKGROUND, Label, LabelGrid, UNLABELED};
use crate::error::{Error, Result};

/// One 4-channel pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a pixel from its channels
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same value on every channel
    pub const fn splat(v: u8) -> Self {
        Self::new(v, v, v, v)
    }
}

/// Per-channel threshold for RGB foreground detection
///
/// A pixel is foreground when each of red, green and blue is strictly
/// greater than its minimum. Alpha is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbaThreshold {
    /// Red must exceed this value
    pub min_red: u8,
    /// Green must exceed this value
    pub min_green: u8,
    /// Blue must exceed this value
    pub min_blue: u8,
}

impl Default for RgbaThreshold {
    fn default() -> Self {
        Self::uniform(100)
    }
}

impl RgbaThreshold {
    /// Use the same minimum on all three color channels
    pub fn uniform(min: u8) -> Self {
        Self {
            min_red: min,
            min_green: min,
            min_blue: min,
        }
    }

    /// Set the red minimum
    pub fn with_min_red(mut self, value: u8) -> Self {
        self.min_red = value;
        self
    }

    /// Set the green minimum
    pub fn with_min_green(mut self, value: u8) -> Self {
        self.min_green = value;
        self
    }

    /// Set the blue minimum
    pub fn with_min_blue(mut self, value: u8) -> Self {
        self.min_blue = value;
        self
    }

    /// Apply the threshold to one pixel
    pub fn is_foreground(&self, r: u8, g: u8, b: u8, _a: u8) -> bool {
        r > self.min_red && g > self.min_green && b > self.min_blue
    }
}

/// Foreground when all of r, g and b are above 100
pub fn rgb_above_100(r: u8, g: u8, b: u8, a: u8) -> bool {
    RgbaThreshold::default().is_foreground(r, g, b, a)
}

/// Opaque white for any component cell, transparent black for background
pub fn max_if_nonzero(label: Label) -> Rgba {
    if label != BACKGROUND {
        Rgba::splat(255)
    } else {
        Rgba::splat(0)
    }
}

impl LabelGrid {
    /// Threshold an interleaved RGBA buffer into a `{0, 1}` grid.
    ///
    /// # Arguments
    ///
    /// * `width`, `height` - Image dimensions
    /// * `rgba` - `width * height * 4` bytes, row-major
    /// * `predicate` - Returns `true` for foreground pixels
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for unusable dimensions and
    /// [`Error::BufferLength`] if `rgba` has the wrong size.
    pub fn from_rgba<F>(width: usize, height: usize, rgba: &[u8], predicate: F) -> Result<Self>
    where
        F: Fn(u8, u8, u8, u8) -> bool,
    {
        let mut grid = LabelGrid::new(width, height)?;
        let expected = grid.len() * 4;
        if rgba.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: rgba.len(),
            });
        }

        for (cell, px) in grid.data_mut().iter_mut().zip(rgba.chunks_exact(4)) {
            if predicate(px[0], px[1], px[2], px[3]) {
                *cell = UNLABELED;
            }
        }

        Ok(grid)
    }

    /// Threshold with an [`RgbaThreshold`].
    ///
    /// # Errors
    ///
    /// Same as [`LabelGrid::from_rgba`].
    pub fn from_rgba_threshold(
        width: usize,
        height: usize,
        rgba: &[u8],
        threshold: &RgbaThreshold,
    ) -> Result<Self> {
        Self::from_rgba(width, height, rgba, |r, g, b, a| {
            threshold.is_foreground(r, g, b, a)
        })
    }

    /// Render every label through `colorize` into an interleaved RGBA buffer.
    pub fn to_rgba<F>(&self, colorize: F) -> Vec<u8>
    where
        F: Fn(Label) -> Rgba,
    {
        let mut out = Vec::with_capacity(self.len() * 4);
        for &label in self.data() {
            let px = colorize(label);
            out.extend_from_slice(&[px.r, px.g, px.b, px.a]);
        }
        out
    }
}
