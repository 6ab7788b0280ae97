//! findimages-core - Basic data structures for page segmentation
//!
//! This crate provides the fundamental data structures shared by the
//! findimages crates:
//!
//! - [`BinaryRaster`] - 1-bpp packed page image with rectangle fill,
//!   border padding, inversion and boolean combination
//! - [`GrayRaster`] - 8-bpp page image, input to binarization
//! - [`Box`] / [`Boxa`] - Rectangle regions and their text format

pub mod box_;
pub mod error;
pub mod gray;
pub mod raster;

pub use box_::{Box, Boxa, SizeSelectRelation, SizeSelectType};
pub use error::{Error, Result};
pub use gray::{GrayRaster, rgb_to_gray};
pub use raster::{BinaryRaster, RopOp};
