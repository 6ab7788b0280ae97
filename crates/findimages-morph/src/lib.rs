//! findimages-morph - Binary morphology for page segmentation
//!
//! This crate provides:
//!
//! - Brick erosion, dilation, opening and closing on packed binary rasters
//! - Rank-order 2x reduction, reduction cascades and power-of-2 expansion
//! - Typed morphological sequences with a compact text form
//! - Morphological seed filling (iterated conditional dilation)

pub mod binary;
mod error;
pub mod morphapp;
pub mod rank;
pub mod sequence;

pub use error::{MorphError, MorphResult};

pub use binary::{close_brick, dilate_brick, erode_brick, open_brick};
pub use morphapp::seedfill_morph;
pub use rank::{expand_binary_power2, expand_pow2, reduce_rank_binary_2x, reduce_rank_cascade};
pub use sequence::{MorphOp, MorphSequence, morph_sequence};
