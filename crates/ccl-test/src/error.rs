//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building test fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// Unrecognized character in an ASCII-art grid
    #[error("invalid fixture character {ch:?} at line {line}, column {column}")]
    FixtureChar {
        ch: char,
        line: usize,
        column: usize,
    },

    /// Grid could not be constructed from the fixture
    #[error("fixture grid error: {0}")]
    Grid(#[from] ccl_core::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
