//! Composite morphological operations

use crate::{MorphError, MorphResult, dilate_brick};
use findimages_core::{BinaryRaster, RopOp};

/// Binary seedfill via morphological dilation (binary reconstruction).
///
/// Iteratively dilates the seed with a 3x3 brick (8-connected) or a 3x3
/// cross (4-connected), AND-ing with the mask after each step, until the
/// result stops changing. Each step only adds pixels and the result is
/// bounded by `mask`, so the loop always reaches a fixed point.
///
/// # Arguments
/// * `seed` - seed raster
/// * `mask` - filling mask, same dimensions as `seed`
/// * `connectivity` - 4 or 8
///
/// Seed pixels outside the mask are dropped on the first step.
pub fn seedfill_morph(
    seed: &BinaryRaster,
    mask: &BinaryRaster,
    connectivity: u8,
) -> MorphResult<BinaryRaster> {
    if connectivity != 4 && connectivity != 8 {
        return Err(MorphError::InvalidParameters(
            "connectivity must be 4 or 8".into(),
        ));
    }
    if !seed.sizes_equal(mask) {
        return Err(MorphError::InvalidParameters(
            "seed and mask must have the same dimensions".into(),
        ));
    }

    let mut current = seed.and(mask)?;
    let mut steps = 0u64;
    loop {
        let mut next = if connectivity == 8 {
            dilate_brick(&current, 3, 3)?
        } else {
            let mut plus = dilate_brick(&current, 3, 1)?;
            plus.rop_in_place(&dilate_brick(&current, 1, 3)?, RopOp::Or)?;
            plus
        };
        next.rop_in_place(mask, RopOp::And)?;
        if next == current {
            break;
        }
        current = next;
        steps += 1;
    }
    tracing::trace!(steps, connectivity, "seedfill_morph converged");
    Ok(current)
}
