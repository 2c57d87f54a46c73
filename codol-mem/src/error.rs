//! Error types for byte-stream reading

use thiserror::Error;

/// Result type alias for byte-stream reader operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for byte-stream reader operations
#[derive(Error, Debug)]
pub enum Error {
    /// Attaching to the target process failed
    #[error("attach failed: {0}")]
    AttachFailed(String),

    /// The expected module was not found in the attached process
    #[error("module not found: {0}")]
    BadModule(String),

    /// Underlying I/O error from a buffer-backed source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
