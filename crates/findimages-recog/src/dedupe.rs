//! Region box post-processing
//!
//! Boxes from the final connected-component pass are sorted largest first
//! and every box fully inside an earlier survivor is dropped. Boxes below a
//! resolution-dependent minimum area are not emitted, but they still
//! suppress the boxes they contain.

use findimages_core::{Box, Boxa};

/// Points per inch
const POINTS_PER_INCH: f64 = 72.0;

/// Area in pixels of a one-point square at `dpi`
///
/// Boxes whose area does not exceed this are too small to report.
pub fn min_area_for_dpi(dpi: f64) -> f64 {
    (POINTS_PER_INCH / dpi).powi(2)
}

/// Remove nested boxes and boxes too small to report
///
/// # Arguments
///
/// * `boxes` - boxes in discovery order
/// * `min_area` - boxes with `area <= min_area` are not emitted
///
/// # Returns
///
/// Surviving boxes, in non-increasing area order. Boxes of equal area keep
/// their discovery order.
pub fn dedupe_boxes(boxes: &Boxa, min_area: f64) -> Boxa {
    let sorted: Vec<Box> = boxes.sorted_by_area(false).into_iter().collect();
    let mut suppressed = vec![false; sorted.len()];
    let mut kept = Boxa::new();

    for (i, outer) in sorted.iter().enumerate() {
        if suppressed[i] {
            continue;
        }
        if outer.area() as f64 > min_area {
            kept.push(*outer);
        }
        for (j, inner) in sorted.iter().enumerate().skip(i + 1) {
            if !suppressed[j] && outer.contains_box(inner) {
                suppressed[j] = true;
            }
        }
    }
    kept
}
