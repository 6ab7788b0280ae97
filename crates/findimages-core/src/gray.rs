//! GrayRaster - 8 bits per pixel page image
//!
//! One byte per pixel, row-major, no padding. 0 is black and 255 is white.

use crate::error::{Error, Result};

/// Luminance weights used for color to gray conversion
pub const RED_WEIGHT: f32 = 0.3;
pub const GREEN_WEIGHT: f32 = 0.59;
pub const BLUE_WEIGHT: f32 = 0.11;

/// Convert an RGB triple to gray with the fixed luminance weights.
#[inline]
pub fn rgb_to_gray(r: u8, g: u8, b: u8) -> u8 {
    let v = RED_WEIGHT * r as f32 + GREEN_WEIGHT * g as f32 + BLUE_WEIGHT * b as f32 + 0.5;
    v.min(255.0) as u8
}

/// An 8-bpp grayscale raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayRaster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl GrayRaster {
    /// Create a raster with every pixel set to `val`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is zero.
    pub fn new(width: u32, height: u32, val: u8) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![val; width as usize * height as usize],
        })
    }

    /// Wrap an existing row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer length is not `width * height`.
    pub fn from_vec(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "gray buffer holds {} bytes, expected {expected}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Get a pixel, or `None` when out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y as usize * self.width as usize + x as usize])
    }

    /// Set a pixel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u8) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: y as usize * self.width as usize + x as usize,
                len: self.data.len(),
            });
        }
        self.data[y as usize * self.width as usize + x as usize] = val;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_gray() {
        assert_eq!(rgb_to_gray(0, 0, 0), 0);
        assert_eq!(rgb_to_gray(255, 255, 255), 255);
        assert_eq!(rgb_to_gray(255, 0, 0), 77);
        assert_eq!(rgb_to_gray(0, 255, 0), 150);
        assert_eq!(rgb_to_gray(0, 0, 255), 28);
    }

    #[test]
    fn test_from_vec_length_checked() {
        assert!(GrayRaster::from_vec(2, 2, vec![0; 4]).is_ok());
        assert!(GrayRaster::from_vec(2, 2, vec![0; 3]).is_err());
        assert!(GrayRaster::new(0, 2, 0).is_err());
    }

    #[test]
    fn test_get_set() {
        let mut g = GrayRaster::new(3, 2, 255).unwrap();
        g.set_pixel(2, 1, 17).unwrap();
        assert_eq!(g.get_pixel(2, 1), Some(17));
        assert_eq!(g.get_pixel(0, 0), Some(255));
        assert_eq!(g.get_pixel(3, 0), None);
        assert!(g.set_pixel(0, 2, 0).is_err());
    }
}
