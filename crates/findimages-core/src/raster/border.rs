//! Border operations for binary rasters
//!
//! - General borders (different size per side)
//! - Trailing padding up to a multiple of some block size
//! - Cropping back to the top-left sub-rectangle

use super::BinaryRaster;
use crate::error::{Error, Result};

impl BinaryRaster {
    /// Add a general border with different sizes per side.
    ///
    /// # Arguments
    ///
    /// * `left` - Left border width
    /// * `right` - Right border width
    /// * `top` - Top border height
    /// * `bot` - Bottom border height
    /// * `val` - Border pixel value (0 or 1)
    ///
    /// # Returns
    ///
    /// New raster with dimensions `(width + left + right, height + top + bot)`
    /// and the original content at `(left, top)`.
    ///
    /// # Errors
    ///
    /// Returns error if dimensions would overflow.
    pub fn add_border_general(
        &self,
        left: u32,
        right: u32,
        top: u32,
        bot: u32,
        val: u32,
    ) -> Result<BinaryRaster> {
        let wd = self
            .width
            .checked_add(left)
            .and_then(|w| w.checked_add(right))
            .ok_or(Error::InvalidDimension {
                width: u32::MAX,
                height: self.height,
            })?;
        let hd = self
            .height
            .checked_add(top)
            .and_then(|h| h.checked_add(bot))
            .ok_or(Error::InvalidDimension {
                width: self.width,
                height: u32::MAX,
            })?;

        let mut dst = BinaryRaster::new(wd, hd)?;
        if val != 0 {
            dst.set_all();
        }

        if left % 32 == 0 {
            let woff = (left / 32) as usize;
            let rem = self.width % 32;
            let last = self.wpl as usize - 1;
            for y in 0..self.height {
                let src = self.row_data(y);
                let drow = dst.row_data_mut(y + top);
                drow[woff..woff + last].copy_from_slice(&src[..last]);
                if rem == 0 {
                    drow[woff + last] = src[last];
                } else {
                    let mask = !0u32 << (32 - rem);
                    drow[woff + last] = (drow[woff + last] & !mask) | src[last];
                }
            }
        } else {
            for y in 0..self.height {
                for x in 0..self.width {
                    let v = self.get_pixel_unchecked(x, y);
                    dst.set_pixel_unchecked(x + left, y + top, v);
                }
            }
        }
        Ok(dst)
    }

    /// Pad the trailing (right and bottom) edges with background so both
    /// dimensions become a multiple of `multiple`.
    ///
    /// Adds `(multiple - w % multiple) % multiple` columns and the
    /// equivalent number of rows. Returns a plain copy when no padding is
    /// needed. Original content stays in the top-left corner.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `multiple` is zero.
    pub fn pad_to_multiple(&self, multiple: u32) -> Result<BinaryRaster> {
        if multiple == 0 {
            return Err(Error::InvalidParameter(
                "padding multiple must be positive".into(),
            ));
        }
        let right = (multiple - self.width % multiple) % multiple;
        let bot = (multiple - self.height % multiple) % multiple;
        if right == 0 && bot == 0 {
            return Ok(self.clone());
        }
        self.add_border_general(0, right, 0, bot, 0)
    }

    /// Remove a general border with different sizes per side.
    ///
    /// # Errors
    ///
    /// Returns error if the border is as large as the image.
    pub fn remove_border_general(
        &self,
        left: u32,
        right: u32,
        top: u32,
        bot: u32,
    ) -> Result<BinaryRaster> {
        let horiz = left as u64 + right as u64;
        let vert = top as u64 + bot as u64;
        if horiz >= self.width as u64 || vert >= self.height as u64 {
            return Err(Error::InvalidParameter(format!(
                "border ({left}, {right}, {top}, {bot}) too large for {}x{} raster",
                self.width, self.height
            )));
        }
        let wd = self.width - left - right;
        let hd = self.height - top - bot;
        let mut dst = BinaryRaster::new(wd, hd)?;
        if left == 0 {
            let n = dst.wpl as usize;
            for y in 0..hd {
                let src = &self.row_data(y + top)[..n];
                dst.row_data_mut(y).copy_from_slice(src);
            }
            dst.clear_unused_bits();
        } else {
            for y in 0..hd {
                for x in 0..wd {
                    let v = self.get_pixel_unchecked(x + left, y + top);
                    dst.set_pixel_unchecked(x, y, v);
                }
            }
        }
        Ok(dst)
    }

    /// Crop to the top-left `width x height` sub-rectangle.
    ///
    /// Used to undo [`pad_to_multiple`](Self::pad_to_multiple). Returns a
    /// plain copy when the size already matches.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the requested size is larger
    /// than the raster or zero.
    pub fn clip_to_size(&self, width: u32, height: u32) -> Result<BinaryRaster> {
        if width > self.width || height > self.height {
            return Err(Error::InvalidParameter(format!(
                "cannot clip {}x{} raster to larger size {width}x{height}",
                self.width, self.height
            )));
        }
        if width == self.width && height == self.height {
            return Ok(self.clone());
        }
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        self.remove_border_general(0, self.width - width, 0, self.height - height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(w: u32, h: u32) -> BinaryRaster {
        let mut r = BinaryRaster::new(w, h).unwrap();
        for y in 0..h {
            for x in 0..w {
                if (x * 7 + y * 3) % 5 == 0 {
                    r.set_pixel(x, y, 1).unwrap();
                }
            }
        }
        r
    }

    #[test]
    fn test_pad_to_multiple_of_64() {
        let r = pattern(100, 70);
        let padded = r.pad_to_multiple(64).unwrap();
        assert_eq!(padded.width(), 128);
        assert_eq!(padded.height(), 128);
        for y in 0..128 {
            for x in 0..128 {
                let expected = if x < 100 && y < 70 {
                    r.get_pixel(x, y).unwrap()
                } else {
                    0
                };
                assert_eq!(padded.get_pixel(x, y).unwrap(), expected, "({x}, {y})");
            }
        }
        assert_eq!(padded.count_pixels(), r.count_pixels());
    }

    #[test]
    fn test_pad_noop_when_aligned() {
        let r = pattern(128, 64);
        let padded = r.pad_to_multiple(64).unwrap();
        assert_eq!(padded, r);
        assert!(r.pad_to_multiple(0).is_err());
    }

    #[test]
    fn test_add_border_unaligned_left_with_ones() {
        let r = pattern(10, 4);
        let b = r.add_border_general(3, 2, 1, 1, 1).unwrap();
        assert_eq!(b.dimensions(), (15, 6));
        assert_eq!(b.get_pixel(0, 0), Some(1));
        assert_eq!(b.get_pixel(14, 5), Some(1));
        for y in 0..4 {
            for x in 0..10 {
                assert_eq!(b.get_pixel(x + 3, y + 1), r.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn test_clip_undoes_padding() {
        let r = pattern(77, 45);
        let padded = r.pad_to_multiple(64).unwrap();
        let clipped = padded.clip_to_size(77, 45).unwrap();
        assert_eq!(clipped, r);
        assert!(r.clip_to_size(78, 45).is_err());
    }

    #[test]
    fn test_remove_border_general_with_offset() {
        let r = pattern(20, 20);
        let inner = r.remove_border_general(5, 3, 2, 4).unwrap();
        assert_eq!(inner.dimensions(), (12, 14));
        for y in 0..14 {
            for x in 0..12 {
                assert_eq!(inner.get_pixel(x, y), r.get_pixel(x + 5, y + 2));
            }
        }
        assert!(r.remove_border_general(10, 10, 0, 0).is_err());
    }
}
