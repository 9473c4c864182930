//! Error types for pipeline operations.

use thiserror::Error;

/// Error type for pipeline operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Core container error.
    #[error(transparent)]
    Core(#[from] tone_core::Error),
}

/// Result type for pipeline operations.
pub type OpsResult<T> = Result<T, OpsError>;
