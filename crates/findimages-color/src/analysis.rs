//! Gray-level statistics

use findimages_core::GrayRaster;

/// Summary of the gray levels in a raster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrayStats {
    /// Lowest occupied gray level
    pub min: u8,
    /// Highest occupied gray level
    pub max: u8,
    /// Mean gray level
    pub mean: f64,
}

impl GrayStats {
    /// Compute min, max and mean from a 256-bin histogram.
    ///
    /// Returns `None` for an empty histogram.
    pub fn from_histogram(hist: &[u32; 256]) -> Option<Self> {
        let min = hist.iter().position(|&c| c > 0)?;
        let max = hist.iter().rposition(|&c| c > 0)?;
        let (count, sum) = hist
            .iter()
            .enumerate()
            .fold((0u64, 0u64), |(n, s), (v, &c)| {
                (n + c as u64, s + v as u64 * c as u64)
            });
        Some(Self {
            min: min as u8,
            max: max as u8,
            mean: sum as f64 / count as f64,
        })
    }

    /// Compute statistics directly from a raster.
    pub fn of(gray: &GrayRaster) -> Self {
        let hist = grayscale_histogram(gray);
        // A GrayRaster always has at least one pixel.
        Self::from_histogram(&hist).unwrap_or(Self {
            min: 0,
            max: 0,
            mean: 0.0,
        })
    }

    /// True if the levels already span 0..=255.
    pub fn is_full_range(&self) -> bool {
        self.min == 0 && self.max == 255
    }
}

/// 256-bin histogram of gray levels
pub fn grayscale_histogram(gray: &GrayRaster) -> [u32; 256] {
    let mut hist = [0u32; 256];
    for &v in gray.data() {
        hist[v as usize] += 1;
    }
    hist
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_and_stats() {
        let gray = GrayRaster::from_vec(2, 2, vec![10, 10, 20, 200]).unwrap();
        let hist = grayscale_histogram(&gray);
        assert_eq!(hist[10], 2);
        assert_eq!(hist[200], 1);
        let stats = GrayStats::of(&gray);
        assert_eq!(stats.min, 10);
        assert_eq!(stats.max, 200);
        assert!((stats.mean - 60.0).abs() < 1e-9);
        assert!(!stats.is_full_range());
    }

    #[test]
    fn test_empty_histogram() {
        assert!(GrayStats::from_histogram(&[0; 256]).is_none());
    }
}
