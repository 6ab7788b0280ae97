//! Detected image regions and their text form
//!
//! Each region is written as one line, `<category> <x> <y> <w> <h>`, with
//! coordinates in original page pixels.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::error::{RecogError, RecogResult};
use findimages_core::Box;

/// Kind of non-text region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionCategory {
    /// Photographic or halftone-screened content, including large graphics
    Halftone,
    /// Non-text content that is not halftone. Never produced by the
    /// segmenter; reserved for a line-art classifier.
    Misc,
}

impl RegionCategory {
    /// Token used in the text output
    pub fn as_str(self) -> &'static str {
        match self {
            RegionCategory::Halftone => "halftone",
            RegionCategory::Misc => "misc",
        }
    }
}

impl fmt::Display for RegionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegionCategory {
    type Err = RecogError;

    fn from_str(s: &str) -> RecogResult<Self> {
        match s {
            "halftone" => Ok(RegionCategory::Halftone),
            "misc" => Ok(RegionCategory::Misc),
            other => Err(RecogError::InvalidRecord(format!(
                "unknown category '{other}'"
            ))),
        }
    }
}

/// A detected region of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageRegion {
    /// What the region contains
    pub category: RegionCategory,
    /// Bounding box in original page coordinates
    pub bounds: Box,
}

impl ImageRegion {
    /// Create a region
    pub fn new(category: RegionCategory, bounds: Box) -> Self {
        Self { category, bounds }
    }

    /// Create a halftone region
    pub fn halftone(bounds: Box) -> Self {
        Self::new(RegionCategory::Halftone, bounds)
    }
}

impl fmt::Display for ImageRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.bounds;
        write!(f, "{} {} {} {} {}", self.category, b.x, b.y, b.w, b.h)
    }
}

impl FromStr for ImageRegion {
    type Err = RecogError;

    fn from_str(line: &str) -> RecogResult<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [category, x, y, w, h] = *fields.as_slice() else {
            return Err(RecogError::InvalidRecord(format!(
                "expected 5 fields, got {}: '{line}'",
                fields.len()
            )));
        };
        let int = |s: &str| {
            s.parse::<i32>()
                .map_err(|_| RecogError::InvalidRecord(format!("bad integer '{s}' in '{line}'")))
        };
        let bounds = Box::new(int(x)?, int(y)?, int(w)?, int(h)?)?;
        Ok(Self::new(category.parse()?, bounds))
    }
}

/// Write one line per region
///
/// # Errors
///
/// Returns [`RecogError::Io`] if the writer fails.
pub fn write_regions<W: Write>(writer: &mut W, regions: &[ImageRegion]) -> RecogResult<()> {
    for region in regions {
        writeln!(writer, "{region}")?;
    }
    writer.flush()?;
    Ok(())
}
