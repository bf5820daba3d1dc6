//! Error types for ccl-label

use thiserror::Error;

/// Errors that can occur while setting up or driving a labeling strategy
///
/// All variants are fatal for the run. Labeling itself never fails; whether
/// its output is correct is decided afterwards by [`crate::verify`].
#[derive(Debug, Error)]
pub enum LabelError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] ccl_core::Error),

    /// Seed outside the grid
    #[error("invalid seed position: ({x}, {y})")]
    InvalidSeed { x: usize, y: usize },

    /// Strategy was run or drained before it accepted an input grid
    #[error("no input grid: call accept_input first")]
    NoInput,

    /// Accelerator dispatch or transfer failed
    #[error("device error: {0}")]
    Device(String),

    /// Strategy name not recognized
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),
}

/// Result type for labeling operations
pub type LabelResult<T> = Result<T, LabelError>;
