//! findimages-color - Grayscale analysis and binarization
//!
//! This crate provides:
//!
//! - Histogram and mean statistics for 8-bit gray rasters
//! - Linear contrast stretching and inversion
//! - Fixed-threshold binarization and automatic page binarization

pub mod analysis;
pub mod enhance;
mod error;
pub mod threshold;

pub use analysis::{GrayStats, grayscale_histogram};
pub use enhance::{contrast_stretch, invert_gray};
pub use error::{ColorError, ColorResult};
pub use threshold::{binarize_page, threshold_to_binary};
