//! findimages-io - Page image reading
//!
//! Reads the scanned page handed to the segmenter. The page comes back as
//! either a binary raster (1-bit sources, where no thresholding is wanted)
//! or an 8-bit gray raster (everything else; color is reduced to gray).
//!
//! Supported formats:
//! - PNG (feature `png-format`)
//! - JPEG (feature `jpeg`)
//! - PBM/PGM/PPM, ASCII and binary (feature `pnm`)
//!
//! PNG writing of binary rasters is also provided, for stage dumps.

mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};
#[cfg(feature = "png-format")]
pub use png::write_png_binary;

use findimages_core::{BinaryRaster, GrayRaster};
use std::path::Path;

/// A decoded page, before binarization.
#[derive(Debug, Clone)]
pub enum PageImage {
    /// 1-bit source; set pixels are black
    Binary(BinaryRaster),
    /// 8-bit gray source (color sources are converted)
    Gray(GrayRaster),
}

impl PageImage {
    /// `(width, height)` of the page
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            PageImage::Binary(r) => r.dimensions(),
            PageImage::Gray(g) => (g.width(), g.height()),
        }
    }
}

/// Read a page image from a file, detecting the format from its header.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the format is not
/// recognized or not enabled, or decoding fails.
pub fn read_page<P: AsRef<Path>>(path: P) -> IoResult<PageImage> {
    let data = std::fs::read(path.as_ref())?;
    read_page_from_bytes(&data)
}

/// Read a page image from an in-memory encoded file.
pub fn read_page_from_bytes(data: &[u8]) -> IoResult<PageImage> {
    match detect_format_from_bytes(data)? {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(std::io::Cursor::new(data)),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(std::io::Cursor::new(data)),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(data),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{other:?} support not enabled"
        ))),
    }
}
