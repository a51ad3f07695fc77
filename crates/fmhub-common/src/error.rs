//! Error types for fmhub

use thiserror::Error;

/// Result type alias for fmhub operations
pub type Result<T> = std::result::Result<T, FmhubError>;

/// Main error type for fmhub
#[derive(Error, Debug)]
pub enum FmhubError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Invalid ORCID identifier: {0}")]
    InvalidOrcid(String),
}
