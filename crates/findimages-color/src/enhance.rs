//! Contrast stretching and inversion

use crate::analysis::GrayStats;
use findimages_core::GrayRaster;

/// Linearly map `[min, max]` of the raster onto `[0, 255]`
///
/// Uses a 256-entry transfer curve `v' = 255 * (v - min) / (max - min)`,
/// rounded. A raster with a single gray level, or one already spanning the
/// full range, is returned unchanged.
pub fn contrast_stretch(gray: &GrayRaster) -> GrayRaster {
    let stats = GrayStats::of(gray);
    if stats.min >= stats.max || stats.is_full_range() {
        return gray.clone();
    }
    let trc = stretch_curve(stats.min, stats.max);
    let mut out = gray.clone();
    for v in out.data_mut() {
        *v = trc[*v as usize];
    }
    out
}

fn stretch_curve(min: u8, max: u8) -> [u8; 256] {
    let mut trc = [0u8; 256];
    let range = f64::from(max - min);
    for (v, out) in trc.iter_mut().enumerate() {
        *out = if v <= min as usize {
            0
        } else if v >= max as usize {
            255
        } else {
            (255.0 * (v - min as usize) as f64 / range + 0.5) as u8
        };
    }
    trc
}

/// Photometric inversion: `v' = 255 - v`
pub fn invert_gray(gray: &GrayRaster) -> GrayRaster {
    let mut out = gray.clone();
    for v in out.data_mut() {
        *v = 255 - *v;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stretch_spans_full_range() {
        let gray = GrayRaster::from_vec(3, 1, vec![50, 100, 150]).unwrap();
        let out = contrast_stretch(&gray);
        assert_eq!(out.data(), &[0, 128, 255]);
    }

    #[test]
    fn test_stretch_single_level_unchanged() {
        let gray = GrayRaster::new(4, 4, 77).unwrap();
        assert_eq!(contrast_stretch(&gray), gray);
    }

    #[test]
    fn test_invert() {
        let gray = GrayRaster::from_vec(2, 1, vec![0, 200]).unwrap();
        assert_eq!(invert_gray(&gray).data(), &[255, 55]);
    }
}
