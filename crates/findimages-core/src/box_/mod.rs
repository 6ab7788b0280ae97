//! Box, Boxa - Rectangles in page coordinates
//!
//! Word boxes from OCR, component bounding boxes and detected regions all
//! use these types. Coordinates are pixels with the origin at the top-left
//! corner; `right` and `bottom` are exclusive.

mod select;
mod serial;

pub use select::{SizeSelectRelation, SizeSelectType};

use crate::error::{Error, Result};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Box {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub w: i32,
    /// Height in pixels
    pub h: i32,
}

impl Box {
    /// Create a box with a non-negative size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `w` or `h` is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "box size must be non-negative, got {w}x{h}"
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a box as given. Word-box files may hold degenerate sizes.
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Area in pixels, widened so large pages cannot overflow.
    #[inline]
    pub fn area(&self) -> i64 {
        i64::from(self.w) * i64::from(self.h)
    }

    /// True if the box covers no pixels (`w <= 0` or `h <= 0`)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Closed containment: every box contains itself, and `other` may share
    /// any edge with `self`.
    pub fn contains_box(&self, other: &Box) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// True if the two boxes share at least one pixel.
    pub fn overlaps(&self, other: &Box) -> bool {
        self.x.max(other.x) < self.right().min(other.right())
            && self.y.max(other.y) < self.bottom().min(other.bottom())
    }
}

/// An ordered list of boxes
///
/// Order is discovery order until a sort is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Boxa {
    boxes: Vec<Box>,
}

impl Boxa {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            boxes: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Box> {
        self.boxes.get(index)
    }

    pub fn push(&mut self, b: Box) {
        self.boxes.push(b);
    }

    /// Stable sort by area; equal areas keep their relative order.
    pub fn sort_by_area(&mut self, ascending: bool) {
        if ascending {
            self.boxes.sort_by_key(Box::area);
        } else {
            self.boxes.sort_by_key(|b| std::cmp::Reverse(b.area()));
        }
    }

    /// Sorted copy, see [`sort_by_area`](Self::sort_by_area).
    pub fn sorted_by_area(&self, ascending: bool) -> Boxa {
        let mut sorted = self.clone();
        sorted.sort_by_area(ascending);
        sorted
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Box> {
        self.boxes.iter()
    }
}

impl FromIterator<Box> for Boxa {
    fn from_iter<T: IntoIterator<Item = Box>>(iter: T) -> Self {
        Self {
            boxes: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Boxa {
    type Item = Box;
    type IntoIter = std::vec::IntoIter<Box>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.into_iter()
    }
}

impl<'a> IntoIterator for &'a Boxa {
    type Item = &'a Box;
    type IntoIter = std::slice::Iter<'a, Box>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_box_is_closed() {
        let outer = Box::new_unchecked(10, 10, 50, 50);
        assert!(outer.contains_box(&outer));
        assert!(outer.contains_box(&Box::new_unchecked(10, 10, 50, 1)));
        assert!(outer.contains_box(&Box::new_unchecked(59, 59, 1, 1)));
        assert!(!outer.contains_box(&Box::new_unchecked(59, 59, 2, 1)));
        assert!(!outer.contains_box(&Box::new_unchecked(9, 10, 5, 5)));
    }

    #[test]
    fn test_new_rejects_negative() {
        assert!(Box::new(0, 0, -1, 5).is_err());
        assert!(Box::new(0, 0, 0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_overlaps() {
        let a = Box::new_unchecked(0, 0, 10, 10);
        assert!(a.overlaps(&Box::new_unchecked(9, 9, 5, 5)));
        assert!(!a.overlaps(&Box::new_unchecked(10, 0, 5, 5)));
        assert!(!a.overlaps(&Box::new_unchecked(3, 3, 0, 4)));
    }

    #[test]
    fn test_sort_by_area_is_stable() {
        let mut boxa: Boxa = [
            Box::new_unchecked(0, 0, 2, 2),
            Box::new_unchecked(1, 0, 4, 1),
            Box::new_unchecked(2, 0, 10, 10),
            Box::new_unchecked(3, 0, 1, 4),
        ]
        .into_iter()
        .collect();
        boxa.sort_by_area(false);
        let xs: Vec<i32> = boxa.iter().map(|b| b.x).collect();
        assert_eq!(xs, vec![2, 0, 1, 3]);

        boxa.sort_by_area(true);
        let xs: Vec<i32> = boxa.iter().map(|b| b.x).collect();
        assert_eq!(xs, vec![0, 1, 3, 2]);
    }
}
