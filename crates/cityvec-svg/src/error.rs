//! Error types for cityvec-svg

use thiserror::Error;

/// Errors that can occur while emitting an SVG document.
#[derive(Debug, Error)]
pub enum SvgError {
    /// Writing to the underlying sink failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for SVG emission operations.
pub type SvgResult<T> = Result<T, SvgError>;
