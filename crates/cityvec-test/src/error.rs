//! Error types for the test support crate.

use thiserror::Error;

/// Errors that can occur while running or recording a regression test.
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to create a test output directory.
    #[error("failed to create directory '{path}': {message}")]
    DirectoryCreate { path: String, message: String },

    /// Golden file not found.
    #[error("golden file not found: {path}")]
    GoldenNotFound { path: String },

    /// Underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for test support operations.
pub type TestResult<T> = Result<T, TestError>;
