//! Rank-order binary reduction and power-of-2 expansion
//!
//! A 2x rank reduction maps every 2x2 block of the source to one output
//! pixel, set when at least `threshold` of the four source pixels are set.
//! Threshold 1 behaves like an OR over the block, threshold 4 like an AND.
//! Output dimensions are the source dimensions halved (truncating).

use crate::{MorphError, MorphResult};
use findimages_core::BinaryRaster;
use findimages_core::raster::{get_data_bit, set_data_bit_val};

/// Maximum number of levels in a reduction cascade.
pub const MAX_CASCADE_LEVELS: usize = 4;

/// Maximum expansion factor for [`expand_binary_power2`].
pub const MAX_EXPANSION_FACTOR: u32 = 16;

/// Even pixel positions (0, 2, 4, ...) of an MSB-first word.
const EVEN_PIXELS: u32 = 0xAAAA_AAAA;

/// Reduce by 2x using rank-order thresholding
///
/// # Arguments
///
/// * `raster` - source raster, at least 2x2
/// * `threshold` - minimum number of set pixels (1..=4) in each 2x2 block
///
/// # Errors
///
/// Returns [`MorphError::InvalidParameters`] for a threshold outside 1..=4
/// or a source smaller than 2x2.
pub fn reduce_rank_binary_2x(raster: &BinaryRaster, threshold: u8) -> MorphResult<BinaryRaster> {
    check_threshold(threshold)?;
    let (w, h) = raster.dimensions();
    if w < 2 || h < 2 {
        return Err(MorphError::InvalidParameters(format!(
            "cannot reduce a {w}x{h} raster by 2x"
        )));
    }

    let mut out = BinaryRaster::new(w / 2, h / 2)?;
    for yd in 0..out.height() {
        let upper = raster.row_data(2 * yd);
        let lower = raster.row_data(2 * yd + 1);
        let dst = out.row_data_mut(yd);
        for (k, word) in dst.iter_mut().enumerate() {
            let fetch = |line: &[u32], i: usize| line.get(i).copied().unwrap_or(0);
            let hi = reduce_word_pair(fetch(upper, 2 * k), fetch(lower, 2 * k), threshold);
            let lo = reduce_word_pair(fetch(upper, 2 * k + 1), fetch(lower, 2 * k + 1), threshold);
            *word = (u32::from(hi) << 16) | u32::from(lo);
        }
    }
    out.clear_unused_bits();
    Ok(out)
}

/// Apply up to four successive 2x rank reductions
///
/// # Arguments
///
/// * `raster` - source raster
/// * `thresholds` - one threshold per level, in application order
///
/// # Errors
///
/// Returns [`MorphError::InvalidParameters`] if `thresholds` is empty, has
/// more than [`MAX_CASCADE_LEVELS`] entries, or contains an invalid
/// threshold.
pub fn reduce_rank_cascade(raster: &BinaryRaster, thresholds: &[u8]) -> MorphResult<BinaryRaster> {
    if thresholds.is_empty() || thresholds.len() > MAX_CASCADE_LEVELS {
        return Err(MorphError::InvalidParameters(format!(
            "cascade needs 1..={MAX_CASCADE_LEVELS} levels, got {}",
            thresholds.len()
        )));
    }
    for &t in thresholds {
        check_threshold(t)?;
    }

    let mut current = reduce_rank_binary_2x(raster, thresholds[0])?;
    for &t in &thresholds[1..] {
        current = reduce_rank_binary_2x(&current, t)?;
    }
    Ok(current)
}

/// Expand by replicating each pixel into a `factor` x `factor` block
///
/// `factor` must be 1, 2, 4, 8 or 16.
pub fn expand_binary_power2(raster: &BinaryRaster, factor: u32) -> MorphResult<BinaryRaster> {
    if !factor.is_power_of_two() || factor > MAX_EXPANSION_FACTOR {
        return Err(MorphError::InvalidParameters(format!(
            "expansion factor must be a power of 2 up to {MAX_EXPANSION_FACTOR}, got {factor}"
        )));
    }
    if factor == 1 {
        return Ok(raster.clone());
    }

    let (w, h) = raster.dimensions();
    let (wd, hd) = match (w.checked_mul(factor), h.checked_mul(factor)) {
        (Some(wd), Some(hd)) => (wd, hd),
        _ => {
            return Err(MorphError::InvalidParameters(format!(
                "expanding {w}x{h} by {factor} overflows"
            )));
        }
    };

    let mut out = BinaryRaster::new(wd, hd)?;
    let wpld = out.wpl() as usize;
    for y in 0..h {
        let line = raster.row_data(y);
        let yd = y * factor;
        {
            let dst = out.row_data_mut(yd);
            for (i, &word) in line.iter().enumerate() {
                if word == 0 {
                    continue;
                }
                let x0 = i as u32 * 32;
                for x in x0..(x0 + 32).min(w) {
                    if get_data_bit(line, x) == 1 {
                        for xd in x * factor..(x + 1) * factor {
                            set_data_bit_val(dst, xd);
                        }
                    }
                }
            }
        }
        let data = out.data_mut();
        let start = yd as usize * wpld;
        for k in 1..factor as usize {
            data.copy_within(start..start + wpld, start + k * wpld);
        }
    }
    Ok(out)
}

/// Expand by `2^levels` in each dimension
pub fn expand_pow2(raster: &BinaryRaster, levels: u32) -> MorphResult<BinaryRaster> {
    if levels > MAX_EXPANSION_FACTOR.trailing_zeros() {
        return Err(MorphError::InvalidParameters(format!(
            "cannot expand by 2^{levels}"
        )));
    }
    expand_binary_power2(raster, 1 << levels)
}

fn check_threshold(threshold: u8) -> MorphResult<()> {
    if !(1..=4).contains(&threshold) {
        return Err(MorphError::InvalidParameters(format!(
            "rank threshold must be in 1..=4, got {threshold}"
        )));
    }
    Ok(())
}

/// Reduce 32 columns of a row pair to 16 output pixels.
fn reduce_word_pair(upper: u32, lower: u32, threshold: u8) -> u16 {
    let (a0, a1) = (upper & EVEN_PIXELS, (upper << 1) & EVEN_PIXELS);
    let (b0, b1) = (lower & EVEN_PIXELS, (lower << 1) & EVEN_PIXELS);
    let hits = match threshold {
        1 => a0 | a1 | b0 | b1,
        2 => (a0 & a1) | (b0 & b1) | ((a0 | a1) & (b0 | b1)),
        3 => (a0 & a1 & (b0 | b1)) | (b0 & b1 & (a0 | a1)),
        _ => a0 & a1 & b0 & b1,
    };
    compact_even_pixels(hits)
}

/// Pack the even-position pixels of a word into 16 MSB-first bits.
fn compact_even_pixels(v: u32) -> u16 {
    let mut x = (v >> 1) & 0x5555_5555;
    x = (x | (x >> 1)) & 0x3333_3333;
    x = (x | (x >> 2)) & 0x0F0F_0F0F;
    x = (x | (x >> 4)) & 0x00FF_00FF;
    x = (x | (x >> 8)) & 0x0000_FFFF;
    x as u16
}
