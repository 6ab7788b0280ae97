//! Error types for findimages-color

use thiserror::Error;

/// Errors that can occur during grayscale processing operations
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] findimages_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for grayscale operations
pub type ColorResult<T> = Result<T, ColorError>;
