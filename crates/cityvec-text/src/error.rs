//! Error types for cityvec-text

use thiserror::Error;

/// Errors that can occur during text detection and erasure.
#[derive(Debug, Error)]
pub enum TextError {
    /// Core library error.
    #[error("core error: {0}")]
    Core(#[from] cityvec_core::Error),

    /// Region library error.
    #[error("region error: {0}")]
    Region(#[from] cityvec_region::RegionError),

    /// Image buffer does not have the expected channel count.
    #[error("wrong channel count: expected {expected}, got {actual}")]
    WrongChannelCount { expected: u8, actual: u8 },
}

/// Result type for text detection operations.
pub type TextResult<T> = Result<T, TextError>;
