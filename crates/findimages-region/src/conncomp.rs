//! Connected component analysis
//!
//! This module provides functions for finding and labeling connected components
//! in binary rasters. Labeling is two-pass with a union-find (disjoint set)
//! table of provisional labels.
//!
//! Final labels run from 1 to the component count and are ordered by each
//! component's first pixel in raster-scan order, so results are
//! deterministic for a given raster.

use crate::error::{RegionError, RegionResult};
use findimages_core::raster::get_data_bit;
use findimages_core::{BinaryRaster, Box, Boxa};

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

impl ConnectivityType {
    /// Number of neighbors, 4 or 8.
    pub fn neighbors(self) -> u8 {
        match self {
            ConnectivityType::FourWay => 4,
            ConnectivityType::EightWay => 8,
        }
    }

    /// Neighbor offsets `(dx, dy)` for this connectivity.
    pub(crate) fn offsets(self) -> &'static [(i32, i32)] {
        const FOUR: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        const EIGHT: [(i32, i32); 8] = [
            (-1, -1),
            (0, -1),
            (1, -1),
            (-1, 0),
            (1, 0),
            (-1, 1),
            (0, 1),
            (1, 1),
        ];
        match self {
            ConnectivityType::FourWay => &FOUR,
            ConnectivityType::EightWay => &EIGHT,
        }
    }
}

impl TryFrom<u8> for ConnectivityType {
    type Error = RegionError;

    fn try_from(n: u8) -> RegionResult<Self> {
        match n {
            4 => Ok(ConnectivityType::FourWay),
            8 => Ok(ConnectivityType::EightWay),
            _ => Err(RegionError::InvalidParameters(format!(
                "connectivity must be 4 or 8, got {n}"
            ))),
        }
    }
}

/// A connected component in a raster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedComponent {
    /// Label of this component in the [`LabelMap`]
    pub label: u32,
    /// Number of pixels in this component
    pub pixel_count: u32,
    /// Bounding box of this component
    pub bounds: Box,
    /// First pixel of the component in raster-scan order
    pub seed: (u32, u32),
}

/// Per-pixel component labels; 0 is background.
#[derive(Debug, Clone)]
pub struct LabelMap {
    width: u32,
    height: u32,
    labels: Vec<u32>,
    components: Vec<ConnectedComponent>,
}

impl LabelMap {
    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Label at (x, y), or `None` outside the map.
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.labels[y as usize * self.width as usize + x as usize])
    }

    /// Components, indexed by `label - 1`.
    pub fn components(&self) -> &[ConnectedComponent] {
        &self.components
    }

    /// Number of components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Consume the map, keeping only the component list.
    pub fn into_components(self) -> Vec<ConnectedComponent> {
        self.components
    }

    /// Rows of labels, one slice per raster row.
    pub(crate) fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.labels.chunks_exact(self.width as usize)
    }
}

/// Label all connected components of a binary raster
pub fn label_connected_components(
    raster: &BinaryRaster,
    connectivity: ConnectivityType,
) -> LabelMap {
    let (w, h) = raster.dimensions();
    let wu = w as usize;
    let mut labels = vec![0u32; wu * h as usize];
    // parent[0] is unused; provisional labels start at 1.
    let mut parent: Vec<u32> = vec![0];

    // Pass 1: provisional labels, recording equivalences.
    for y in 0..h {
        let line = raster.row_data(y);
        let row_start = y as usize * wu;
        for (i, &word) in line.iter().enumerate() {
            if word == 0 {
                continue;
            }
            let x0 = i as u32 * 32;
            for x in x0..(x0 + 32).min(w) {
                if get_data_bit(line, x) == 0 {
                    continue;
                }
                let idx = row_start + x as usize;
                let mut current = 0u32;
                for (dx, dy) in previous_neighbors(connectivity) {
                    let nx = x as i64 + dx;
                    let ny = y as i64 + dy;
                    if nx < 0 || ny < 0 || nx >= w as i64 {
                        continue;
                    }
                    let n = labels[ny as usize * wu + nx as usize];
                    if n == 0 {
                        continue;
                    }
                    if current == 0 {
                        current = n;
                    } else if n != current {
                        union(&mut parent, current, n);
                    }
                }
                if current == 0 {
                    current = parent.len() as u32;
                    parent.push(current);
                }
                labels[idx] = current;
            }
        }
    }

    // Pass 2: resolve to roots, renumber in scan order and collect stats.
    let mut final_label = vec![0u32; parent.len()];
    let mut components: Vec<ConnectedComponent> = Vec::new();
    let mut extents: Vec<(u32, u32, u32, u32)> = Vec::new();
    for y in 0..h {
        let row_start = y as usize * wu;
        for x in 0..w {
            let idx = row_start + x as usize;
            let provisional = labels[idx];
            if provisional == 0 {
                continue;
            }
            let root = find(&mut parent, provisional) as usize;
            if final_label[root] == 0 {
                components.push(ConnectedComponent {
                    label: components.len() as u32 + 1,
                    pixel_count: 0,
                    bounds: Box::new_unchecked(x as i32, y as i32, 1, 1),
                    seed: (x, y),
                });
                extents.push((x, y, x, y));
                final_label[root] = components.len() as u32;
            }
            let label = final_label[root];
            labels[idx] = label;
            let k = label as usize - 1;
            components[k].pixel_count += 1;
            let e = &mut extents[k];
            e.0 = e.0.min(x);
            e.1 = e.1.min(y);
            e.2 = e.2.max(x);
            e.3 = e.3.max(y);
        }
    }
    for (comp, &(x0, y0, x1, y1)) in components.iter_mut().zip(&extents) {
        comp.bounds = Box::new_unchecked(
            x0 as i32,
            y0 as i32,
            (x1 - x0 + 1) as i32,
            (y1 - y0 + 1) as i32,
        );
    }

    LabelMap {
        width: w,
        height: h,
        labels,
        components,
    }
}

/// Find all connected components of a binary raster
///
/// Components are returned in label order.
pub fn find_connected_components(
    raster: &BinaryRaster,
    connectivity: ConnectivityType,
) -> Vec<ConnectedComponent> {
    label_connected_components(raster, connectivity).into_components()
}

/// Bounding boxes of all connected components, in label order.
pub fn conncomp_boxes(raster: &BinaryRaster, connectivity: ConnectivityType) -> Boxa {
    find_connected_components(raster, connectivity)
        .into_iter()
        .map(|c| c.bounds)
        .collect()
}

/// Neighbors already visited in a raster scan.
fn previous_neighbors(connectivity: ConnectivityType) -> &'static [(i64, i64)] {
    const FOUR: [(i64, i64); 2] = [(-1, 0), (0, -1)];
    const EIGHT: [(i64, i64); 4] = [(-1, 0), (-1, -1), (0, -1), (1, -1)];
    match connectivity {
        ConnectivityType::FourWay => &FOUR,
        ConnectivityType::EightWay => &EIGHT,
    }
}

fn find(parent: &mut [u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        let grandparent = parent[parent[x as usize] as usize];
        parent[x as usize] = grandparent;
        x = grandparent;
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        let (small, big) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[big as usize] = small;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use findimages_test::raster_from_rows;

    #[test]
    fn test_empty_raster() {
        let r = BinaryRaster::new(40, 10).unwrap();
        let map = label_connected_components(&r, ConnectivityType::EightWay);
        assert_eq!(map.component_count(), 0);
        assert_eq!(map.get(5, 5), Some(0));
    }

    #[test]
    fn test_diagonal_connectivity() {
        let r = raster_from_rows(&["#...", ".#..", "..#.", "...#"]);
        assert_eq!(
            find_connected_components(&r, ConnectivityType::FourWay).len(),
            4
        );
        let eight = find_connected_components(&r, ConnectivityType::EightWay);
        assert_eq!(eight.len(), 1);
        assert_eq!(eight[0].pixel_count, 4);
        assert_eq!(eight[0].bounds, Box::new_unchecked(0, 0, 4, 4));
    }

    #[test]
    fn test_u_shape_merges() {
        // The two arms get different provisional labels and merge at the bottom.
        let r = raster_from_rows(&["#...#", "#...#", "#####", ".....", "..#.."]);
        let comps = find_connected_components(&r, ConnectivityType::FourWay);
        assert_eq!(comps.len(), 2);
        assert_eq!(comps[0].label, 1);
        assert_eq!(comps[0].pixel_count, 9);
        assert_eq!(comps[0].bounds, Box::new_unchecked(0, 0, 5, 3));
        assert_eq!(comps[0].seed, (0, 0));
        assert_eq!(comps[1].bounds, Box::new_unchecked(2, 4, 1, 1));
    }

    #[test]
    fn test_anti_diagonal_eight_way() {
        let r = raster_from_rows(&["..#", ".#.", "#.."]);
        assert_eq!(
            find_connected_components(&r, ConnectivityType::EightWay).len(),
            1
        );
    }

    #[test]
    fn test_labels_across_words() {
        let mut r = BinaryRaster::new(100, 3).unwrap();
        r.fill_rect(20, 1, 60, 1, 1);
        let map = label_connected_components(&r, ConnectivityType::FourWay);
        assert_eq!(map.component_count(), 1);
        assert_eq!(map.get(31, 1), Some(1));
        assert_eq!(map.get(32, 1), Some(1));
        assert_eq!(map.get(79, 1), Some(1));
        assert_eq!(map.get(80, 1), Some(0));
    }

    #[test]
    fn test_conncomp_boxes() {
        let r = raster_from_rows(&["##..#", "##...", ".....", "...##"]);
        let boxes = conncomp_boxes(&r, ConnectivityType::EightWay);
        assert_eq!(boxes.len(), 3);
        assert_eq!(*boxes.get(0).unwrap(), Box::new_unchecked(0, 0, 2, 2));
        assert_eq!(*boxes.get(1).unwrap(), Box::new_unchecked(4, 0, 1, 1));
        assert_eq!(*boxes.get(2).unwrap(), Box::new_unchecked(3, 3, 2, 1));
    }

    #[test]
    fn test_connectivity_from_u8() {
        assert_eq!(
            ConnectivityType::try_from(8).unwrap(),
            ConnectivityType::EightWay
        );
        assert_eq!(ConnectivityType::FourWay.neighbors(), 4);
        assert!(ConnectivityType::try_from(6).is_err());
    }
}
