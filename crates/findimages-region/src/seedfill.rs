//! Seed fill operations
//!
//! Binary reconstruction: grow a seed raster through a mask raster until
//! every mask component touched by the seed is filled.

use std::collections::VecDeque;

use crate::conncomp::ConnectivityType;
use crate::error::RegionResult;
use findimages_core::BinaryRaster;
use findimages_core::raster::get_data_bit;

/// Fill `mask` from `seed`
///
/// The result is the union of all connected components of `mask` (under
/// `connectivity`) that contain at least one pixel of `seed AND mask`.
/// Seed pixels outside the mask never appear in the output, so the result is
/// always a subset of the mask.
///
/// # Arguments
///
/// * `seed` - seed raster
/// * `mask` - filling mask
/// * `connectivity` - connectivity used while filling
///
/// # Errors
///
/// Returns [`RegionError::Core`](crate::RegionError::Core) with a dimension
/// mismatch if `seed` and `mask` differ in size.
pub fn seedfill_binary(
    seed: &BinaryRaster,
    mask: &BinaryRaster,
    connectivity: ConnectivityType,
) -> RegionResult<BinaryRaster> {
    let start = seed.and(mask)?;
    let (w, h) = mask.dimensions();
    let mut filled = start.clone();
    let mut queue = VecDeque::new();

    for y in 0..h {
        let line = start.row_data(y);
        for (i, &word) in line.iter().enumerate() {
            if word == 0 {
                continue;
            }
            let x0 = i as u32 * 32;
            for x in x0..(x0 + 32).min(w) {
                if get_data_bit(line, x) == 1 {
                    queue.push_back((x, y));
                }
            }
        }
    }

    let offsets = connectivity.offsets();
    while let Some((x, y)) = queue.pop_front() {
        for &(dx, dy) in offsets {
            let nx = x as i64 + dx as i64;
            let ny = y as i64 + dy as i64;
            if nx < 0 || ny < 0 || nx >= w as i64 || ny >= h as i64 {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);
            if mask.get_pixel_unchecked(nx, ny) == 1 && filled.get_pixel_unchecked(nx, ny) == 0 {
                filled.set_pixel_unchecked(nx, ny, 1);
                queue.push_back((nx, ny));
            }
        }
    }

    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RegionError;
    use findimages_test::raster_from_rows;

    #[test]
    fn test_fills_touched_components_only() {
        let mask = raster_from_rows(&[
            "###....##",
            "###....##",
            ".......##",
            "#........",
        ]);
        let seed = raster_from_rows(&[
            ".........",
            ".#.......",
            ".........",
            ".........",
        ]);
        let filled = seedfill_binary(&seed, &mask, ConnectivityType::EightWay).unwrap();
        assert_eq!(filled.count_pixels(), 6);
        assert_eq!(filled.get_pixel(7, 0), Some(0));
        assert_eq!(filled.get_pixel(0, 3), Some(0));
    }

    #[test]
    fn test_connectivity_matters() {
        let mask = raster_from_rows(&["##..", "##..", "..##", "..##"]);
        let seed = raster_from_rows(&["#...", "....", "....", "...."]);
        let four = seedfill_binary(&seed, &mask, ConnectivityType::FourWay).unwrap();
        let eight = seedfill_binary(&seed, &mask, ConnectivityType::EightWay).unwrap();
        assert_eq!(four.count_pixels(), 4);
        assert_eq!(eight, mask);
    }

    #[test]
    fn test_seed_outside_mask() {
        let mask = raster_from_rows(&["##..", "##.."]);
        let seed = raster_from_rows(&["...#", "...."]);
        let filled = seedfill_binary(&seed, &mask, ConnectivityType::EightWay).unwrap();
        assert!(filled.is_zero());
    }

    #[test]
    fn test_bounds() {
        let mask = raster_from_rows(&["###.#", "#.#.#", "###.#"]);
        let seed = raster_from_rows(&["#....", ".....", "....."]);
        let filled = seedfill_binary(&seed, &mask, ConnectivityType::FourWay).unwrap();
        assert!(filled.is_subset_of(&mask).unwrap());
        assert!(seed.and(&mask).unwrap().is_subset_of(&filled).unwrap());
        assert_eq!(filled.count_pixels(), 8);
    }

    #[test]
    fn test_size_mismatch() {
        let a = BinaryRaster::new(4, 4).unwrap();
        let b = BinaryRaster::new(4, 5).unwrap();
        assert!(matches!(
            seedfill_binary(&a, &b, ConnectivityType::FourWay),
            Err(RegionError::Core(_))
        ));
    }
}
