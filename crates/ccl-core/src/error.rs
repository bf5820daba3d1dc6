//! Error types for ccl-core
//!
//! Provides a unified error type for grid construction and access.
//! Every variant is a setup failure: callers are expected to abort the run
//! rather than retry.

use thiserror::Error;

/// ccl-core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Zero-sized grid, or a grid whose flat indices do not fit the label range
    #[error("invalid grid dimensions: {width}x{height}")]
    InvalidDimension { width: usize, height: usize },

    /// Buffer does not match the grid size
    #[error("buffer length mismatch: expected {expected}, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    /// Coordinates outside the grid
    #[error("index out of bounds: ({x}, {y}) in {width}x{height} grid")]
    IndexOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// Two grids that must share a size do not
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
}

/// Result type alias for ccl-core operations
pub type Result<T> = std::result::Result<T, Error>;
