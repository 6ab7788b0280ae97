//! findimages - Halftone and line-art region detection for scanned pages
//!
//! Given a page image, its resolution and the word boxes an OCR engine
//! found on it, reports the bounding boxes of the page's non-text regions.
//!
//! # Overview
//!
//! - Page reading and binarization ([`io`], [`color`])
//! - Brick morphology, rank reduction and sequences ([`morph`])
//! - Connected components and seeded reconstruction ([`region`])
//! - The segmentation pipeline and region output ([`recog`])
//!
//! # Example
//!
//! ```
//! use findimages::{BinaryRaster, recog::{PageSegOptions, find_image_regions}};
//!
//! let mut page = BinaryRaster::new(256, 256).unwrap();
//! page.fill_rect(40, 40, 120, 120, 1);
//! let regions = find_image_regions(&page, 300.0, None, &PageSegOptions::default()).unwrap();
//! assert_eq!(regions.len(), 1);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use findimages_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use findimages_color as color;
pub use findimages_io as io;
pub use findimages_morph as morph;
pub use findimages_recog as recog;
pub use findimages_region as region;
