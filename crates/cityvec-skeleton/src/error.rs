//! Error types for cityvec-skeleton

use thiserror::Error;

/// Errors that can occur during skeletonisation.
#[derive(Debug, Error)]
pub enum SkeletonError {
    /// Core library error.
    #[error("core error: {0}")]
    Core(#[from] cityvec_core::Error),

    /// Image buffer does not have the expected channel count.
    #[error("wrong channel count: expected {expected}, got {actual}")]
    WrongChannelCount { expected: u8, actual: u8 },
}

/// Result type for skeletonisation operations.
pub type SkeletonResult<T> = Result<T, SkeletonError>;
