//! Error types for the voxinv-core library.

use thiserror::Error;

/// Main error type for the voxinv library.
#[derive(Error, Debug)]
pub enum VoxError {
    /// Transcript extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised around the extraction engine.
///
/// The engine itself never fails on a string input; these errors belong to
/// the request boundary that feeds it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The transcript was empty or whitespace only.
    #[error("transcript is empty")]
    EmptyTranscript,

    /// Field validation failed.
    #[error("validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },
}

/// Result type for the voxinv library.
pub type Result<T> = std::result::Result<T, VoxError>;
