//! Raster operations: rectangle fill, inversion and boolean combination
//!
//! All two-operand operations require identical dimensions. A mismatch
//! is reported as [`Error::DimensionMismatch`]; callers are expected to
//! pad, clip or expand beforehand.

use super::BinaryRaster;
use crate::box_::Box;
use crate::error::{Error, Result};

/// Boolean operation combining two rasters word by word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RopOp {
    /// `a & b`
    And,
    /// `a | b`
    Or,
    /// `a ^ b`
    Xor,
    /// `a & !b`
    Subtract,
}

impl RopOp {
    #[inline]
    fn apply(self, a: u32, b: u32) -> u32 {
        match self {
            RopOp::And => a & b,
            RopOp::Or => a | b,
            RopOp::Xor => a ^ b,
            RopOp::Subtract => a & !b,
        }
    }
}

impl BinaryRaster {
    /// Set or clear every pixel inside a rectangle.
    ///
    /// The rectangle is clipped to the raster; parts outside are ignored,
    /// and a rectangle with `w <= 0` or `h <= 0` does nothing.
    ///
    /// # Arguments
    ///
    /// * `x`, `y` - Top-left corner (may be negative)
    /// * `w`, `h` - Size in pixels
    /// * `val` - 0 clears, any other value sets
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, val: u32) {
        if w <= 0 || h <= 0 {
            return;
        }
        let x0 = (x as i64).max(0);
        let y0 = (y as i64).max(0);
        let x1 = (x as i64 + w as i64).min(self.width as i64);
        let y1 = (y as i64 + h as i64).min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let (x0, x1) = (x0 as u32, x1 as u32);
        let first = (x0 / 32) as usize;
        let last = ((x1 - 1) / 32) as usize;
        let head = !0u32 >> (x0 % 32);
        let tail = !0u32 << (31 - (x1 - 1) % 32);

        for yy in y0 as u32..y1 as u32 {
            let row = self.row_data_mut(yy);
            for (i, word) in row.iter_mut().enumerate().take(last + 1).skip(first) {
                let mut mask = !0u32;
                if i == first {
                    mask &= head;
                }
                if i == last {
                    mask &= tail;
                }
                if val != 0 {
                    *word |= mask;
                } else {
                    *word &= !mask;
                }
            }
        }
    }

    /// Set or clear the pixels covered by `b`, clipped to the raster.
    #[inline]
    pub fn fill_box(&mut self, b: &Box, val: u32) {
        self.fill_rect(b.x, b.y, b.w, b.h, val);
    }

    /// Complement every pixel in place.
    pub fn invert(&mut self) {
        for w in self.data.iter_mut() {
            *w = !*w;
        }
        self.clear_unused_bits();
    }

    /// Return the complement as a new raster.
    pub fn inverted(&self) -> BinaryRaster {
        let mut d = self.clone();
        d.invert();
        d
    }

    /// Combine `other` into `self` in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if sizes differ.
    pub fn rop_in_place(&mut self, other: &BinaryRaster, op: RopOp) -> Result<()> {
        if !self.sizes_equal(other) {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        for (d, &s) in self.data.iter_mut().zip(other.data.iter()) {
            *d = op.apply(*d, s);
        }
        Ok(())
    }

    /// Combine two rasters into a new one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if sizes differ.
    pub fn rop(&self, other: &BinaryRaster, op: RopOp) -> Result<BinaryRaster> {
        let mut d = self.clone();
        d.rop_in_place(other, op)?;
        Ok(d)
    }

    /// `self AND other`
    pub fn and(&self, other: &BinaryRaster) -> Result<BinaryRaster> {
        self.rop(other, RopOp::And)
    }

    /// `self OR other`
    pub fn or(&self, other: &BinaryRaster) -> Result<BinaryRaster> {
        self.rop(other, RopOp::Or)
    }

    /// `self XOR other`
    pub fn xor(&self, other: &BinaryRaster) -> Result<BinaryRaster> {
        self.rop(other, RopOp::Xor)
    }

    /// `self AND NOT other`
    pub fn subtract(&self, other: &BinaryRaster) -> Result<BinaryRaster> {
        self.rop(other, RopOp::Subtract)
    }

    /// True if every set pixel of `self` is also set in `other`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if sizes differ.
    pub fn is_subset_of(&self, other: &BinaryRaster) -> Result<bool> {
        if !self.sizes_equal(other) {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .all(|(&a, &b)| a & !b == 0))
    }
}
