//! Binary thresholding
//!
//! Converts 8-bit gray pages to binary rasters where set pixels are dark
//! foreground.

use crate::ColorResult;
use crate::analysis::GrayStats;
use crate::enhance::{contrast_stretch, invert_gray};
use findimages_core::{BinaryRaster, GrayRaster};

/// Convert a gray raster to binary using a fixed threshold
///
/// Pixels with value `< threshold` become set (foreground); all others are
/// cleared.
pub fn threshold_to_binary(gray: &GrayRaster, threshold: u8) -> ColorResult<BinaryRaster> {
    let w = gray.width();
    let mut out = BinaryRaster::new(w, gray.height())?;
    for (y, row) in gray.data().chunks_exact(w as usize).enumerate() {
        for (x, &v) in row.iter().enumerate() {
            if v < threshold {
                out.set_pixel_unchecked(x as u32, y as u32, 1);
            }
        }
    }
    Ok(out)
}

/// Binarize a scanned page
///
/// Stretches the contrast to the full gray range, thresholds at the rounded
/// mean, and inverts first when the page is predominantly dark so that
/// foreground is always the minority ink.
pub fn binarize_page(gray: &GrayRaster) -> ColorResult<BinaryRaster> {
    let stretched = contrast_stretch(gray);
    let stats = GrayStats::of(&stretched);
    let threshold = stats.mean.round().clamp(0.0, 255.0) as u8;

    if stats.mean < 128.0 {
        tracing::debug!(mean = stats.mean, threshold, "dark page, inverting before threshold");
        threshold_to_binary(&invert_gray(&stretched), 255 - threshold)
    } else {
        tracing::debug!(mean = stats.mean, threshold, "binarizing page");
        threshold_to_binary(&stretched, threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_to_binary() {
        let gray = GrayRaster::from_vec(4, 1, vec![0, 99, 100, 255]).unwrap();
        let bin = threshold_to_binary(&gray, 100).unwrap();
        assert_eq!(bin.get_pixel(0, 0), Some(1));
        assert_eq!(bin.get_pixel(1, 0), Some(1));
        assert_eq!(bin.get_pixel(2, 0), Some(0));
        assert_eq!(bin.get_pixel(3, 0), Some(0));
    }

    #[test]
    fn test_binarize_light_page() {
        // Mostly white page with a dark mark.
        let mut data = vec![230u8; 100];
        data[44] = 20;
        data[45] = 20;
        let gray = GrayRaster::from_vec(10, 10, data).unwrap();
        let bin = binarize_page(&gray).unwrap();
        assert_eq!(bin.count_pixels(), 2);
        assert_eq!(bin.get_pixel(4, 4), Some(1));
    }

    #[test]
    fn test_binarize_dark_page() {
        // Light text on a dark background.
        let mut data = vec![15u8; 100];
        data[0] = 240;
        data[99] = 240;
        let gray = GrayRaster::from_vec(10, 10, data).unwrap();
        let bin = binarize_page(&gray).unwrap();
        assert_eq!(bin.count_pixels(), 2);
        assert_eq!(bin.get_pixel(0, 0), Some(1));
        assert_eq!(bin.get_pixel(9, 9), Some(1));
    }

    #[test]
    fn test_binarize_uniform_page() {
        let gray = GrayRaster::new(8, 8, 255).unwrap();
        assert!(binarize_page(&gray).unwrap().is_zero());
    }
}
