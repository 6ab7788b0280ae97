//! findimages-region - Region analysis on binary rasters
//!
//! - Connected component labeling (4- and 8-connectivity)
//! - Binary reconstruction: filling a mask from a seed
//! - Component selection by bounding-box size

pub mod conncomp;
mod error;
pub mod seedfill;
pub mod select;

pub use conncomp::{
    ConnectedComponent, ConnectivityType, LabelMap, conncomp_boxes, find_connected_components,
    label_connected_components,
};
pub use error::{RegionError, RegionResult};
pub use seedfill::seedfill_binary;
pub use select::{SizeSelectRelation, SizeSelectType, select_by_size};
