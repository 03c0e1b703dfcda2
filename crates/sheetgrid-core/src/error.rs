//! Error types for sheetgrid-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sheetgrid-core
///
/// Extraction itself never fails; these errors surface only from the strict
/// parsing helpers, and their callers log and drop the offending input.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell reference format
    #[error("Invalid cell reference: {0}")]
    InvalidReference(String),

    /// Invalid merge range format
    #[error("Invalid merge range: {0}")]
    InvalidRange(String),
}
