//! Journal error types
//!
//! Defines all errors that can occur while loading or importing journal data.

use thiserror::Error;

/// Errors that can occur at the journal boundary
#[derive(Error, Debug)]
pub enum JournalError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// CSV reading failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A field could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Records failed validation
    #[error("Invalid journal: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

impl From<serde_json::Error> for JournalError {
    fn from(err: serde_json::Error) -> Self {
        JournalError::Serialization(err.to_string())
    }
}

/// Result type alias for journal operations
pub type JournalResult<T> = Result<T, JournalError>;
