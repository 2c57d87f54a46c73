//! Error types for the IFS archive library

use std::io;
use thiserror::Error;

/// Result type alias for IFS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for IFS operations
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid IFS format or corrupted archive
    #[error("Invalid IFS format: {0}")]
    InvalidFormat(String),

    /// Unsupported IFS version
    #[error("Unsupported IFS version: {0}")]
    UnsupportedVersion(u16),

    /// File not found in archive
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// HET table error
    #[error("HET table error: {0}")]
    HetTable(String),

    /// BET table error
    #[error("BET table error: {0}")]
    BetTable(String),

    /// Encryption/decryption error
    #[error("Cryptography error: {0}")]
    Crypto(String),

    /// Compression/decompression error
    #[error("Compression error: {0}")]
    Compression(String),

    /// Invalid header location or alignment
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Invalid file size
    #[error("Invalid file size: expected {expected}, got {actual}")]
    InvalidFileSize {
        /// Expected size
        expected: u64,
        /// Actual size
        actual: u64,
    },

    /// Invalid UTF-8 in filename or listfile entry
    #[error("Invalid UTF-8 in filename")]
    InvalidUtf8,

    /// Listfile is missing or malformed
    #[error("Listfile error: {0}")]
    Listfile(String),

    /// Feature not yet implemented
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    /// Invalid bounds access
    #[error("Invalid bounds access: {0}")]
    InvalidBounds(String),

    /// Decompression error
    #[error("Decompression error: {0}")]
    Decompression(String),
}

impl Error {
    /// Create a new InvalidFormat error
    pub fn invalid_format<S: Into<String>>(msg: S) -> Self {
        Error::InvalidFormat(msg.into())
    }

    /// Create a new Crypto error
    pub fn crypto<S: Into<String>>(msg: S) -> Self {
        Error::Crypto(msg.into())
    }

    /// Create a new Compression error
    pub fn compression<S: Into<String>>(msg: S) -> Self {
        Error::Compression(msg.into())
    }

    /// Create a new HetTable error
    pub fn het_table<S: Into<String>>(msg: S) -> Self {
        Error::HetTable(msg.into())
    }

    /// Create a new BetTable error
    pub fn bet_table<S: Into<String>>(msg: S) -> Self {
        Error::BetTable(msg.into())
    }

    /// Create a new Listfile error
    pub fn listfile<S: Into<String>>(msg: S) -> Self {
        Error::Listfile(msg.into())
    }

    /// Create a new InvalidBounds error
    pub fn invalid_bounds<S: Into<String>>(msg: S) -> Self {
        Error::InvalidBounds(msg.into())
    }

    /// Create a new Decompression error
    pub fn decompression<S: Into<String>>(msg: S) -> Self {
        Error::Decompression(msg.into())
    }

    /// Check if this error indicates the archive is corrupted
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Error::InvalidFormat(_) | Error::InvalidHeader(_) | Error::HetTable(_) | Error::BetTable(_)
        )
    }

    /// Check if this error is recoverable (caller can try another archive or path)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::FileNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_creation() {
        let err = Error::invalid_format("bad header");
        assert_eq!(err.to_string(), "Invalid IFS format: bad header");

        let err = Error::FileNotFound("test.iwi".to_string());
        assert_eq!(err.to_string(), "File not found: test.iwi");
    }

    #[test]
    fn error_classification() {
        let corruption_err = Error::het_table("signature mismatch");
        assert!(corruption_err.is_corruption());
        assert!(!corruption_err.is_recoverable());

        let recoverable_err = Error::FileNotFound("missing.iwi".to_string());
        assert!(!recoverable_err.is_corruption());
        assert!(recoverable_err.is_recoverable());
    }
}
