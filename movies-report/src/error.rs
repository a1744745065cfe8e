//! Error types for movies-report

use thiserror::Error;

/// Main error type for the report stage
#[derive(Error, Debug)]
pub enum ReportError {
    /// Store access or configuration errors
    #[error(transparent)]
    Store(#[from] movies_common::Error),

    /// Chart drawing errors
    #[error("Chart error: {0}")]
    Chart(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type using ReportError
pub type Result<T> = std::result::Result<T, ReportError>;

impl ReportError {
    pub(crate) fn chart(e: impl std::fmt::Display) -> Self {
        ReportError::Chart(e.to_string())
    }
}
