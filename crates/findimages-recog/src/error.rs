//! Error types for findimages-recog

use thiserror::Error;

/// Errors that can occur during page segmentation
#[derive(Debug, Error)]
pub enum RecogError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] findimages_core::Error),

    /// Morphology library error
    #[error("morphology error: {0}")]
    Morph(#[from] findimages_morph::MorphError),

    /// Region library error
    #[error("region error: {0}")]
    Region(#[from] findimages_region::RegionError),

    /// Invalid parameter provided
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Malformed region record
    #[error("invalid region record: {0}")]
    InvalidRecord(String),

    /// I/O error while writing results
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for page segmentation
pub type RecogResult<T> = Result<T, RecogError>;
