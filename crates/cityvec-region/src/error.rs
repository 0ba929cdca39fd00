//! Error types for cityvec-region

use thiserror::Error;

/// Errors that can occur during region processing operations.
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error.
    #[error("core error: {0}")]
    Core(#[from] cityvec_core::Error),

    /// Image buffer does not have the expected channel count.
    #[error("wrong channel count: expected {expected}, got {actual}")]
    WrongChannelCount { expected: u8, actual: u8 },

    /// Invalid parameters passed to a region operation.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for region operations.
pub type RegionResult<T> = Result<T, RegionError>;
