//! BinaryRaster - 1 bit per pixel page image
//!
//! Pixels are packed MSB-to-LSB into 32-bit words, one padded run of words
//! per row. A set bit (1) is foreground (black ink); a clear bit (0) is
//! background. Bits past `width` in the last word of each row are kept
//! clear so that word-level operations can compare and count whole words.
//!
//! Rasters are plain owned values. Operations that produce a new image
//! return a new `BinaryRaster`; the few in-place operations take `&mut self`.

mod access;
mod border;
mod rop;

pub use rop::RopOp;

pub use access::{clear_data_bit, get_data_bit, set_data_bit, set_data_bit_val};

use crate::error::{Error, Result};

/// A 1-bpp raster image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryRaster {
    width: u32,
    height: u32,
    wpl: u32,
    data: Vec<u32>,
}

impl BinaryRaster {
    /// Create an all-zero raster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let wpl = width.div_ceil(32);
        let len = (wpl as usize)
            .checked_mul(height as usize)
            .ok_or(Error::InvalidDimension { width, height })?;
        Ok(Self {
            width,
            height,
            wpl,
            data: vec![0; len],
        })
    }

    /// Create a raster of the same size with every pixel cleared.
    pub fn create_template(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            wpl: self.wpl,
            data: vec![0; self.data.len()],
        }
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Words per line
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.wpl
    }

    /// `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Check that two rasters have identical dimensions.
    #[inline]
    pub fn sizes_equal(&self, other: &BinaryRaster) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Raw packed words, row after row.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    /// Mutable access to the packed words.
    ///
    /// Callers that write whole words must call
    /// [`clear_unused_bits`](Self::clear_unused_bits) afterwards.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.data
    }

    /// Words of row `y`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let wpl = self.wpl as usize;
        let start = y as usize * wpl;
        &self.data[start..start + wpl]
    }

    /// Mutable words of row `y`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let wpl = self.wpl as usize;
        let start = y as usize * wpl;
        &mut self.data[start..start + wpl]
    }

    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height` or `x` lies past the row's words.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        get_data_bit(self.row_data(y), x)
    }

    /// Set a pixel value at (x, y). Any nonzero `val` sets the bit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width as usize,
            });
        }
        if y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height as usize,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        set_data_bit(self.row_data_mut(y), x, val);
    }

    /// Clear the padding bits past `width` in every row.
    pub fn clear_unused_bits(&mut self) {
        let rem = self.width % 32;
        if rem == 0 {
            return;
        }
        let mask = !0u32 << (32 - rem);
        let wpl = self.wpl as usize;
        for row in self.data.chunks_exact_mut(wpl) {
            row[wpl - 1] &= mask;
        }
    }

    /// Set every pixel to 1.
    pub fn set_all(&mut self) {
        self.data.fill(!0);
        self.clear_unused_bits();
    }

    /// Clear every pixel to 0.
    pub fn clear_all(&mut self) {
        self.data.fill(0);
    }

    /// True if no pixel is set.
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|&w| w == 0)
    }

    /// Number of set pixels.
    pub fn count_pixels(&self) -> u64 {
        self.data.iter().map(|w| w.count_ones() as u64).sum()
    }
}
