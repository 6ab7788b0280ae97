//! Binary brick morphology
//!
//! Erosion, dilation, opening and closing with rectangular structuring
//! elements, computed separably (horizontal pass, then vertical pass) with
//! word-level shifts.
//!
//! The brick origin sits at `(width / 2, height / 2)`. Pixels outside the
//! raster are OFF for dilation and ON for erosion, so closing never removes
//! foreground and opening never adds it, even at the raster edges.

use crate::{MorphError, MorphResult};
use findimages_core::BinaryRaster;

/// Dilate with a `width` x `height` brick
///
/// # Errors
///
/// Returns [`MorphError::InvalidSel`] if either dimension is zero.
pub fn dilate_brick(raster: &BinaryRaster, width: u32, height: u32) -> MorphResult<BinaryRaster> {
    check_brick(width, height)?;
    if width == 1 && height == 1 {
        return Ok(raster.clone());
    }
    let tmp = dilate_horizontal(raster, width);
    let mut out = dilate_vertical(&tmp, height);
    out.clear_unused_bits();
    Ok(out)
}

/// Erode with a `width` x `height` brick
///
/// # Errors
///
/// Returns [`MorphError::InvalidSel`] if either dimension is zero.
pub fn erode_brick(raster: &BinaryRaster, width: u32, height: u32) -> MorphResult<BinaryRaster> {
    check_brick(width, height)?;
    if width == 1 && height == 1 {
        return Ok(raster.clone());
    }
    let tmp = erode_horizontal(raster, width);
    let mut out = erode_vertical(&tmp, height);
    out.clear_unused_bits();
    Ok(out)
}

/// Open with a brick structuring element
///
/// Opening = erosion followed by dilation.
pub fn open_brick(raster: &BinaryRaster, width: u32, height: u32) -> MorphResult<BinaryRaster> {
    check_brick(width, height)?;
    if width == 1 && height == 1 {
        return Ok(raster.clone());
    }
    let eroded = erode_brick(raster, width, height)?;
    dilate_brick(&eroded, width, height)
}

/// Close with a brick structuring element
///
/// Closing = dilation followed by erosion. The result always contains the
/// input.
pub fn close_brick(raster: &BinaryRaster, width: u32, height: u32) -> MorphResult<BinaryRaster> {
    check_brick(width, height)?;
    if width == 1 && height == 1 {
        return Ok(raster.clone());
    }
    let dilated = dilate_brick(raster, width, height)?;
    erode_brick(&dilated, width, height)
}

fn check_brick(width: u32, height: u32) -> MorphResult<()> {
    if width == 0 || height == 0 {
        return Err(MorphError::InvalidSel(format!(
            "brick size must be positive, got {width}x{height}"
        )));
    }
    Ok(())
}

/// Offsets of the brick hits relative to the origin at `size / 2`.
fn brick_offsets(size: u32) -> std::ops::RangeInclusive<i32> {
    let origin = (size / 2) as i32;
    -origin..=(size as i32 - 1 - origin)
}

fn dilate_horizontal(src: &BinaryRaster, width: u32) -> BinaryRaster {
    if width == 1 {
        return src.clone();
    }
    let mut out = src.create_template();
    for y in 0..src.height() {
        let line = src.row_data(y);
        let dst = out.row_data_mut(y);
        // dst(x) |= src(x - d)
        for d in brick_offsets(width) {
            shift_or_row(dst, line, d, 0);
        }
    }
    out.clear_unused_bits();
    out
}

fn erode_horizontal(src: &BinaryRaster, width: u32) -> BinaryRaster {
    if width == 1 {
        return src.clone();
    }
    let w = src.width();
    let mut out = src.create_template();
    let mut line = vec![0u32; src.wpl() as usize];
    for y in 0..src.height() {
        line.copy_from_slice(src.row_data(y));
        set_unused_bits(&mut line, w);
        let dst = out.row_data_mut(y);
        dst.fill(!0);
        // dst(x) &= src(x + d)
        for d in brick_offsets(width) {
            shift_and_row(dst, &line, -d, !0);
        }
    }
    out.clear_unused_bits();
    out
}

fn dilate_vertical(src: &BinaryRaster, height: u32) -> BinaryRaster {
    if height == 1 {
        return src.clone();
    }
    let h = src.height() as i64;
    let mut out = src.create_template();
    for y in 0..src.height() {
        let dst = out.row_data_mut(y);
        for d in brick_offsets(height) {
            let sy = y as i64 - d as i64;
            if sy < 0 || sy >= h {
                continue;
            }
            for (dw, sw) in dst.iter_mut().zip(src.row_data(sy as u32)) {
                *dw |= *sw;
            }
        }
    }
    out
}

fn erode_vertical(src: &BinaryRaster, height: u32) -> BinaryRaster {
    if height == 1 {
        return src.clone();
    }
    let h = src.height() as i64;
    let mut out = src.create_template();
    for y in 0..src.height() {
        let dst = out.row_data_mut(y);
        dst.fill(!0);
        for d in brick_offsets(height) {
            let sy = y as i64 + d as i64;
            if sy < 0 || sy >= h {
                // Rows outside the raster are ON.
                continue;
            }
            for (dw, sw) in dst.iter_mut().zip(src.row_data(sy as u32)) {
                *dw &= *sw;
            }
        }
    }
    out.clear_unused_bits();
    out
}

/// Set the padding bits past `width` in the last word of a row.
fn set_unused_bits(line: &mut [u32], width: u32) {
    let rem = width % 32;
    if rem != 0 {
        if let Some(last) = line.last_mut() {
            *last |= !0u32 >> rem;
        }
    }
}

/// Word `i` of `src` with its pixels moved right by `shift` (left if negative).
///
/// Words read from outside the row take the value `fill`.
fn shifted_word(src: &[u32], i: usize, shift: i32, fill: u32) -> u32 {
    let fetch = |k: isize| -> u32 {
        if k < 0 || k as usize >= src.len() {
            fill
        } else {
            src[k as usize]
        }
    };
    let abs_shift = shift.unsigned_abs() as usize;
    let word_shift = (abs_shift / 32) as isize;
    let bit_shift = (abs_shift % 32) as u32;
    let i = i as isize;

    if shift >= 0 {
        let cur = fetch(i - word_shift);
        if bit_shift == 0 {
            cur
        } else {
            (cur >> bit_shift) | (fetch(i - word_shift - 1) << (32 - bit_shift))
        }
    } else {
        let cur = fetch(i + word_shift);
        if bit_shift == 0 {
            cur
        } else {
            (cur << bit_shift) | (fetch(i + word_shift + 1) >> (32 - bit_shift))
        }
    }
}

fn shift_or_row(dst: &mut [u32], src: &[u32], shift: i32, fill: u32) {
    for (i, word) in dst.iter_mut().enumerate() {
        *word |= shifted_word(src, i, shift, fill);
    }
}

fn shift_and_row(dst: &mut [u32], src: &[u32], shift: i32, fill: u32) {
    for (i, word) in dst.iter_mut().enumerate() {
        *word &= shifted_word(src, i, shift, fill);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_pixel(w: u32, h: u32, x: u32, y: u32) -> BinaryRaster {
        let mut r = BinaryRaster::new(w, h).unwrap();
        r.set_pixel(x, y, 1).unwrap();
        r
    }

    #[test]
    fn test_dilate_single_pixel() {
        let r = single_pixel(20, 20, 10, 10);
        let d = dilate_brick(&r, 3, 3).unwrap();
        assert_eq!(d.count_pixels(), 9);
        for y in 9..=11 {
            for x in 9..=11 {
                assert_eq!(d.get_pixel(x, y), Some(1));
            }
        }
    }

    #[test]
    fn test_dilate_across_word_boundary() {
        let r = single_pixel(70, 3, 31, 1);
        let d = dilate_brick(&r, 3, 1).unwrap();
        assert_eq!(d.count_pixels(), 3);
        assert_eq!(d.get_pixel(30, 1), Some(1));
        assert_eq!(d.get_pixel(32, 1), Some(1));
    }

    #[test]
    fn test_dilate_wide_brick() {
        let r = single_pixel(100, 1, 40, 0);
        let d = dilate_brick(&r, 71, 1).unwrap();
        assert_eq!(d.count_pixels(), 71);
        assert_eq!(d.get_pixel(5, 0), Some(1));
        assert_eq!(d.get_pixel(75, 0), Some(1));
        assert_eq!(d.get_pixel(4, 0), Some(0));
        assert_eq!(d.get_pixel(76, 0), Some(0));
    }

    #[test]
    fn test_dilate_even_brick_origin() {
        let r = single_pixel(16, 1, 5, 0);
        let d = dilate_brick(&r, 2, 1).unwrap();
        assert_eq!(d.get_pixel(4, 0), Some(1));
        assert_eq!(d.get_pixel(5, 0), Some(1));
        assert_eq!(d.count_pixels(), 2);
    }

    #[test]
    fn test_erode_block_to_center() {
        let mut r = BinaryRaster::new(20, 20).unwrap();
        r.fill_rect(5, 5, 3, 3, 1);
        let e = erode_brick(&r, 3, 3).unwrap();
        assert_eq!(e.count_pixels(), 1);
        assert_eq!(e.get_pixel(6, 6), Some(1));
    }

    #[test]
    fn test_erode_full_raster_keeps_edges() {
        let mut r = BinaryRaster::new(45, 17).unwrap();
        r.set_all();
        let e = erode_brick(&r, 5, 5).unwrap();
        assert_eq!(e, r);
    }

    #[test]
    fn test_dilate_clears_padding() {
        let r = single_pixel(33, 2, 32, 0);
        let d = dilate_brick(&r, 5, 1).unwrap();
        assert_eq!(d.count_pixels(), 3);
        let last = d.row_data(0)[1];
        assert_eq!(last & (!0u32 >> 1), 0);
    }

    #[test]
    fn test_close_is_extensive() {
        let mut r = BinaryRaster::new(50, 40).unwrap();
        r.fill_rect(0, 0, 10, 3, 1);
        r.fill_rect(20, 10, 1, 1, 1);
        r.fill_rect(45, 30, 5, 10, 1);
        r.fill_rect(30, 5, 3, 1, 1);
        r.fill_rect(34, 5, 3, 1, 1);
        let c = close_brick(&r, 3, 3).unwrap();
        assert!(r.is_subset_of(&c).unwrap());
        // The one-pixel gap between the two short runs is bridged.
        assert_eq!(c.get_pixel(33, 5), Some(1));
    }

    #[test]
    fn test_open_is_anti_extensive() {
        let mut r = BinaryRaster::new(50, 40).unwrap();
        r.fill_rect(2, 2, 10, 10, 1);
        r.fill_rect(30, 30, 2, 2, 1);
        let o = open_brick(&r, 5, 5).unwrap();
        assert!(o.is_subset_of(&r).unwrap());
        assert_eq!(o.count_pixels(), 100);
        assert_eq!(o.get_pixel(30, 30), Some(0));
    }

    #[test]
    fn test_zero_size_brick_error() {
        let r = BinaryRaster::new(10, 10).unwrap();
        assert!(matches!(
            dilate_brick(&r, 0, 3),
            Err(MorphError::InvalidSel(_))
        ));
        assert!(erode_brick(&r, 3, 0).is_err());
    }

    #[test]
    fn test_identity_brick() {
        let r = single_pixel(10, 10, 3, 4);
        assert_eq!(close_brick(&r, 1, 1).unwrap(), r);
        assert_eq!(open_brick(&r, 1, 1).unwrap(), r);
    }
}
