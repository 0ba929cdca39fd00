//! Error types for cityvec-graph

use thiserror::Error;

/// Errors that can occur during graph extraction or refinement.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Core library error.
    #[error("core error: {0}")]
    Core(#[from] cityvec_core::Error),

    /// Image buffer does not have the expected channel count.
    #[error("wrong channel count: expected {expected}, got {actual}")]
    WrongChannelCount { expected: u8, actual: u8 },

    /// The pre-thinned and thinned bitmaps passed to stroke-width
    /// estimation do not share dimensions.
    #[error("dimension mismatch: pre-thinned is {pre_width}x{pre_height}, thinned is {thin_width}x{thin_height}")]
    DimensionMismatch {
        pre_width: u32,
        pre_height: u32,
        thin_width: u32,
        thin_height: u32,
    },
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
