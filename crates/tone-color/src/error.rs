//! Color operation error types.

use thiserror::Error;

/// Result type for color operations.
pub type ColorResult<T> = Result<T, ColorError>;

/// Errors that can occur validating or loading color data.
#[derive(Debug, Error)]
pub enum ColorError {
    /// Response table failed validation.
    #[error("invalid response table: {0}")]
    InvalidTable(String),

    /// Parse error when loading table files.
    #[error("parse error: {0}")]
    ParseError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
