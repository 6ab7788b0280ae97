//! findimages-recog - Page segmentation
//!
//! Locates halftone (photographic) and line-art regions on a binary page
//! image, excluding known text-word boxes, and reports them as
//! de-duplicated bounding boxes.
//!
//! - [`generate_nontext_mask`]: the multi-resolution morphology pipeline
//! - [`dedupe_boxes`]: largest-first containment suppression
//! - [`find_image_regions`]: both, producing [`ImageRegion`] records
//! - [`StageObserver`]: hook for inspecting intermediate rasters

pub mod dedupe;
mod error;
pub mod pageseg;
pub mod region;
pub mod stage;

pub use dedupe::{dedupe_boxes, min_area_for_dpi};
pub use error::{RecogError, RecogResult};
pub use pageseg::{
    PageSegOptions, find_image_regions, find_image_regions_with_observer, generate_nontext_mask,
};
pub use region::{ImageRegion, RegionCategory, write_regions};
pub use stage::{NoopObserver, Stage, StageCollector, StageObserver};
