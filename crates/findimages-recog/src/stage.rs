//! Pipeline stage observation
//!
//! The segmentation pipeline reports each intermediate raster to a
//! [`StageObserver`] as soon as it is produced. Observers only borrow the
//! raster; anything they want to keep must be cloned.

use std::fmt;

use findimages_core::BinaryRaster;

/// Observable stages of the page segmentation pipeline, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Padded page after single-pixel noise removal
    Cleaned,
    /// Page with the known word boxes cleared
    WordsMasked,
    /// Bounding boxes of components larger than the size limit, filled
    LargeComponents,
    /// Working raster at half resolution
    Reduced,
    /// Halftone seed, realigned to the working resolution
    HalftoneSeed,
    /// Candidate region for growing the halftone seed
    HalftoneSeedMask,
    /// Seed grown into its mask
    PrimaryHalftone,
    /// Halftone mask from the secondary sequence path
    SecondaryHalftone,
    /// Union of the primary and secondary halftone masks
    CombinedHalftone,
    /// Working-raster pixels under the halftone mask
    HalftonePixels,
    /// Working-raster pixels outside the halftone mask
    LineArt,
    /// Line art after size filtering and closing
    FilteredLineArt,
    /// Halftone mask regrown at full resolution
    FullResHalftone,
    /// Final non-text mask at the original page size
    NonText,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 14] = [
        Stage::Cleaned,
        Stage::WordsMasked,
        Stage::LargeComponents,
        Stage::Reduced,
        Stage::HalftoneSeed,
        Stage::HalftoneSeedMask,
        Stage::PrimaryHalftone,
        Stage::SecondaryHalftone,
        Stage::CombinedHalftone,
        Stage::HalftonePixels,
        Stage::LineArt,
        Stage::FilteredLineArt,
        Stage::FullResHalftone,
        Stage::NonText,
    ];

    /// Position of the stage in [`Stage::ALL`].
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&s| s == self).unwrap_or(0)
    }

    /// Short kebab-case name, used in logs and debug file names.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Cleaned => "cleaned",
            Stage::WordsMasked => "words-masked",
            Stage::LargeComponents => "large-components",
            Stage::Reduced => "reduced",
            Stage::HalftoneSeed => "halftone-seed",
            Stage::HalftoneSeedMask => "halftone-seed-mask",
            Stage::PrimaryHalftone => "primary-halftone",
            Stage::SecondaryHalftone => "secondary-halftone",
            Stage::CombinedHalftone => "combined-halftone",
            Stage::HalftonePixels => "halftone-pixels",
            Stage::LineArt => "line-art",
            Stage::FilteredLineArt => "filtered-line-art",
            Stage::FullResHalftone => "full-res-halftone",
            Stage::NonText => "non-text",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Receives intermediate rasters from the segmentation pipeline
pub trait StageObserver {
    /// Called once per stage, in execution order.
    fn observe(&mut self, stage: Stage, raster: &BinaryRaster);
}

impl<F> StageObserver for F
where
    F: FnMut(Stage, &BinaryRaster),
{
    fn observe(&mut self, stage: Stage, raster: &BinaryRaster) {
        self(stage, raster)
    }
}

/// Observer that ignores every stage
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StageObserver for NoopObserver {
    fn observe(&mut self, _stage: Stage, _raster: &BinaryRaster) {}
}

/// Observer that keeps a copy of every stage raster
#[derive(Debug, Clone, Default)]
pub struct StageCollector {
    stages: Vec<(Stage, BinaryRaster)>,
}

impl StageCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Raster recorded for `stage`, if that stage ran.
    pub fn get(&self, stage: Stage) -> Option<&BinaryRaster> {
        self.stages
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, r)| r)
    }

    /// Stages in the order they were observed.
    pub fn stages(&self) -> impl Iterator<Item = Stage> + '_ {
        self.stages.iter().map(|(s, _)| *s)
    }

    /// Number of recorded stages
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// True if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl StageObserver for StageCollector {
    fn observe(&mut self, stage: Stage, raster: &BinaryRaster) {
        self.stages.push((stage, raster.clone()));
    }
}
