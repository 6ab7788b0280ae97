//! Synthetic page builders

use crate::error::TestResult;
use findimages_core::{BinaryRaster, Box};

/// Build a raster from rows of text, `#` or `x` for set pixels and any
/// other character for background.
///
/// # Panics
///
/// Panics if `rows` is empty or the rows differ in length.
pub fn raster_from_rows(rows: &[&str]) -> BinaryRaster {
    let h = rows.len() as u32;
    let w = rows[0].chars().count() as u32;
    let mut r = BinaryRaster::new(w, h).expect("non-empty rows");
    for (y, row) in rows.iter().enumerate() {
        assert_eq!(row.chars().count() as u32, w, "ragged row {y}");
        for (x, c) in row.chars().enumerate() {
            if c == '#' || c == 'x' {
                r.set_pixel_unchecked(x as u32, y as u32, 1);
            }
        }
    }
    r
}

/// Build a `w x h` page with each box filled solid.
pub fn page_with_rects(w: u32, h: u32, rects: &[Box]) -> TestResult<BinaryRaster> {
    let mut r = BinaryRaster::new(w, h)?;
    for b in rects {
        r.fill_box(b, 1);
    }
    Ok(r)
}

/// Build a `w x h` checkerboard with pixel (0, 0) set.
pub fn checkerboard(w: u32, h: u32) -> TestResult<BinaryRaster> {
    let mut r = BinaryRaster::new(w, h)?;
    for y in 0..h {
        for x in (y % 2..w).step_by(2) {
            r.set_pixel_unchecked(x, y, 1);
        }
    }
    Ok(r)
}

/// Paint a dotted screen into `b`: a 2x2 dot at every `period` pixels.
pub fn halftone_patch(r: &mut BinaryRaster, b: &Box, period: u32) {
    let period = period.max(3) as usize;
    for y in (b.y.max(0)..b.bottom()).step_by(period) {
        for x in (b.x.max(0)..b.right()).step_by(period) {
            r.fill_rect(x, y, 2, 2, 1);
        }
    }
}
