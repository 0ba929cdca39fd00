//! Error types for cityvec-core
//!
//! Provides a unified error type for the core data model. Each variant
//! captures enough context for diagnostics without exposing internal
//! implementation details.

use thiserror::Error;

/// Core error type, returned by bitmap and geometry operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions (zero width or height where non-zero is required).
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Index out of bounds in a pixel buffer or component array.
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Image buffer does not have the expected channel count.
    #[error("wrong channel count: expected {expected}, got {actual}")]
    WrongChannelCount { expected: u8, actual: u8 },

    /// Invalid parameter value passed to an operation.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Buffer length does not match width * height * channels.
    #[error("buffer length mismatch: expected {expected}, got {actual}")]
    BufferLengthMismatch { expected: usize, actual: usize },
}

/// Result type alias for cityvec-core operations.
pub type Result<T> = std::result::Result<T, Error>;
