//! Component selection by size
//!
//! Keeps or removes whole connected components of a binary raster based on
//! the dimensions of their bounding boxes.

use crate::conncomp::{ConnectivityType, label_connected_components};
use findimages_core::BinaryRaster;
pub use findimages_core::{SizeSelectRelation, SizeSelectType};

/// Select connected components by bounding-box size
///
/// # Arguments
///
/// * `raster` - input raster
/// * `width_thresh` - width threshold
/// * `height_thresh` - height threshold
/// * `connectivity` - connectivity used to find components
/// * `select_type` - whether both or either dimension must satisfy the relation
/// * `relation` - comparison against the thresholds
///
/// # Returns
///
/// A raster of the same size containing every pixel of the selected
/// components and nothing else.
///
/// # Examples
///
/// ```
/// use findimages_core::BinaryRaster;
/// use findimages_region::{
///     ConnectivityType, SizeSelectRelation, SizeSelectType, find_connected_components,
///     select_by_size,
/// };
///
/// let mut raster = BinaryRaster::new(50, 50).unwrap();
/// raster.fill_rect(0, 0, 5, 5, 1);
/// raster.fill_rect(20, 20, 2, 2, 1);
///
/// // Keep only components where both dimensions >= 4
/// let result = select_by_size(
///     &raster, 4, 4,
///     ConnectivityType::FourWay,
///     SizeSelectType::IfBoth,
///     SizeSelectRelation::Gte,
/// );
///
/// let comps = find_connected_components(&result, ConnectivityType::FourWay);
/// assert_eq!(comps.len(), 1); // Only the 5x5 block remains
/// ```
pub fn select_by_size(
    raster: &BinaryRaster,
    width_thresh: i32,
    height_thresh: i32,
    connectivity: ConnectivityType,
    select_type: SizeSelectType,
    relation: SizeSelectRelation,
) -> BinaryRaster {
    let labels = label_connected_components(raster, connectivity);
    let mut output = raster.create_template();
    if labels.component_count() == 0 {
        return output;
    }

    // keep[label]; label 0 is background.
    let mut keep = vec![false; labels.component_count() + 1];
    for comp in labels.components() {
        keep[comp.label as usize] =
            comp.bounds
                .satisfies_size(width_thresh, height_thresh, select_type, relation);
    }
    if keep[1..].iter().all(|&k| k) {
        return raster.clone();
    }

    for (y, row) in labels.rows().enumerate() {
        for (x, &label) in row.iter().enumerate() {
            if label > 0 && keep[label as usize] {
                output.set_pixel_unchecked(x as u32, y as u32, 1);
            }
        }
    }
    output
}
