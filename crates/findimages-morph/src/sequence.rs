//! Morphological sequence operations
//!
//! A [`MorphSequence`] is an ordered list of typed [`MorphOp`] records that
//! is applied left to right by [`morph_sequence`]. Its `Display` form is a
//! compact trace notation (`r11 + o5.5 + x2`) used in log output.
//!
//! # Examples
//!
//! ```
//! use findimages_morph::sequence::MorphSequence;
//!
//! let seq = MorphSequence::new()
//!     .reduce_rank(&[1, 1, 4, 3])
//!     .open(5, 5)
//!     .expand(4);
//! assert_eq!(seq.len(), 3);
//! assert_eq!(seq.net_reduction(), 2);
//! assert_eq!(seq.to_string(), "r1143 + o5.5 + x4");
//! ```

use std::fmt;

use crate::rank::{MAX_CASCADE_LEVELS, MAX_EXPANSION_FACTOR};
use crate::{MorphError, MorphResult};
use crate::{
    close_brick, dilate_brick, erode_brick, expand_binary_power2, open_brick, reduce_rank_cascade,
};
use findimages_core::BinaryRaster;

/// A single step of a morphological sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MorphOp {
    /// Dilation with a brick structuring element
    Dilate {
        /// Width of the brick SE
        width: u32,
        /// Height of the brick SE
        height: u32,
    },
    /// Erosion with a brick structuring element
    Erode {
        /// Width of the brick SE
        width: u32,
        /// Height of the brick SE
        height: u32,
    },
    /// Opening (erosion followed by dilation)
    Open {
        /// Width of the brick SE
        width: u32,
        /// Height of the brick SE
        height: u32,
    },
    /// Closing (dilation followed by erosion)
    Close {
        /// Width of the brick SE
        width: u32,
        /// Height of the brick SE
        height: u32,
    },
    /// Cascade of 2x rank reductions
    ReduceRank {
        /// One threshold (1..=4) per level
        thresholds: Vec<u8>,
    },
    /// Replicative expansion
    Expand {
        /// Expansion factor, a power of 2
        factor: u32,
    },
}

impl MorphOp {
    /// Net change in resolution level: positive for reductions, negative
    /// for expansions, zero for brick operations.
    pub fn level_change(&self) -> i32 {
        match self {
            MorphOp::ReduceRank { thresholds } => thresholds.len() as i32,
            MorphOp::Expand { factor } => -(factor.trailing_zeros() as i32),
            _ => 0,
        }
    }

    fn verify(&self) -> MorphResult<()> {
        match self {
            MorphOp::Dilate { width, height }
            | MorphOp::Erode { width, height }
            | MorphOp::Open { width, height }
            | MorphOp::Close { width, height } => {
                if *width == 0 || *height == 0 {
                    return Err(MorphError::InvalidSequence(format!(
                        "{self}: brick dimensions must be positive"
                    )));
                }
            }
            MorphOp::ReduceRank { thresholds } => {
                if thresholds.is_empty() || thresholds.len() > MAX_CASCADE_LEVELS {
                    return Err(MorphError::InvalidSequence(format!(
                        "{self}: 1..={MAX_CASCADE_LEVELS} reduction levels required"
                    )));
                }
                if thresholds.iter().any(|t| !(1..=4).contains(t)) {
                    return Err(MorphError::InvalidSequence(format!(
                        "{self}: rank thresholds must be in 1..=4"
                    )));
                }
            }
            MorphOp::Expand { factor } => {
                if *factor < 2 || !factor.is_power_of_two() || *factor > MAX_EXPANSION_FACTOR {
                    return Err(MorphError::InvalidSequence(format!(
                        "{self}: expansion factor must be 2, 4, 8 or 16"
                    )));
                }
            }
        }
        Ok(())
    }

    fn apply(&self, raster: &BinaryRaster) -> MorphResult<BinaryRaster> {
        match self {
            MorphOp::Dilate { width, height } => dilate_brick(raster, *width, *height),
            MorphOp::Erode { width, height } => erode_brick(raster, *width, *height),
            MorphOp::Open { width, height } => open_brick(raster, *width, *height),
            MorphOp::Close { width, height } => close_brick(raster, *width, *height),
            MorphOp::ReduceRank { thresholds } => reduce_rank_cascade(raster, thresholds),
            MorphOp::Expand { factor } => expand_binary_power2(raster, *factor),
        }
    }
}

impl fmt::Display for MorphOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MorphOp::Dilate { width, height } => write!(f, "d{width}.{height}"),
            MorphOp::Erode { width, height } => write!(f, "e{width}.{height}"),
            MorphOp::Open { width, height } => write!(f, "o{width}.{height}"),
            MorphOp::Close { width, height } => write!(f, "c{width}.{height}"),
            MorphOp::ReduceRank { thresholds } => {
                write!(f, "r")?;
                for t in thresholds {
                    write!(f, "{t}")?;
                }
                Ok(())
            }
            MorphOp::Expand { factor } => write!(f, "x{factor}"),
        }
    }
}

/// An ordered list of morphological operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MorphSequence {
    ops: Vec<MorphOp>,
}

impl MorphSequence {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sequence from a list of operations
    pub fn from_ops(ops: Vec<MorphOp>) -> Self {
        Self { ops }
    }

    /// Append a dilation
    pub fn dilate(mut self, width: u32, height: u32) -> Self {
        self.ops.push(MorphOp::Dilate { width, height });
        self
    }

    /// Append an erosion
    pub fn erode(mut self, width: u32, height: u32) -> Self {
        self.ops.push(MorphOp::Erode { width, height });
        self
    }

    /// Append an opening
    pub fn open(mut self, width: u32, height: u32) -> Self {
        self.ops.push(MorphOp::Open { width, height });
        self
    }

    /// Append a closing
    pub fn close(mut self, width: u32, height: u32) -> Self {
        self.ops.push(MorphOp::Close { width, height });
        self
    }

    /// Append a rank reduction cascade
    pub fn reduce_rank(mut self, thresholds: &[u8]) -> Self {
        self.ops.push(MorphOp::ReduceRank {
            thresholds: thresholds.to_vec(),
        });
        self
    }

    /// Append a replicative expansion
    pub fn expand(mut self, factor: u32) -> Self {
        self.ops.push(MorphOp::Expand { factor });
        self
    }

    /// Get the operations
    pub fn ops(&self) -> &[MorphOp] {
        &self.ops
    }

    /// Number of operations
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the sequence has no operations
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Resolution levels lost over the whole sequence
    ///
    /// A result of 2 means the output is 1/4 the size of the input in each
    /// dimension.
    pub fn net_reduction(&self) -> i32 {
        self.ops.iter().map(MorphOp::level_change).sum()
    }

    /// Check every operation's parameters
    ///
    /// Also rejects sequences that expand past the input resolution at any
    /// point.
    pub fn verify(&self) -> MorphResult<()> {
        if self.ops.is_empty() {
            return Err(MorphError::InvalidSequence("empty sequence".to_string()));
        }
        let mut level = 0;
        for op in &self.ops {
            op.verify()?;
            level += op.level_change();
            if level < 0 {
                return Err(MorphError::InvalidSequence(format!(
                    "{op}: expands past the input resolution"
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for MorphSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

/// Execute a morphological sequence on a binary raster
///
/// # Errors
///
/// Returns the first verification or execution error.
pub fn morph_sequence(raster: &BinaryRaster, sequence: &MorphSequence) -> MorphResult<BinaryRaster> {
    sequence.verify()?;
    let mut current = raster.clone();
    for op in sequence.ops() {
        current = op.apply(&current)?;
        tracing::trace!(
            op = %op,
            width = current.width(),
            height = current.height(),
            "morph sequence step"
        );
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_produce_typed_ops() {
        let seq = MorphSequence::new().reduce_rank(&[1, 1, 4, 3]).open(5, 5).expand(4);
        assert_eq!(
            seq.ops(),
            &[
                MorphOp::ReduceRank {
                    thresholds: vec![1, 1, 4, 3]
                },
                MorphOp::Open {
                    width: 5,
                    height: 5
                },
                MorphOp::Expand { factor: 4 },
            ]
        );
        assert_eq!(
            MorphSequence::new().dilate(3, 3).erode(5, 1).close(2, 2).to_string(),
            "d3.3 + e5.1 + c2.2"
        );
    }

    #[test]
    fn test_verify_errors() {
        assert!(MorphSequence::new().verify().is_err());
        assert!(MorphSequence::new().dilate(0, 3).verify().is_err());
        assert!(MorphSequence::new().reduce_rank(&[1, 5]).verify().is_err());
        assert!(MorphSequence::new().reduce_rank(&[1; 5]).verify().is_err());
        assert!(MorphSequence::new().reduce_rank(&[]).verify().is_err());
        assert!(MorphSequence::new().reduce_rank(&[1]).expand(3).verify().is_err());
        assert!(MorphSequence::new().reduce_rank(&[1]).expand(32).verify().is_err());
    }

    #[test]
    fn test_verify_rejects_over_expansion() {
        assert!(MorphSequence::new().reduce_rank(&[1, 1]).expand(8).verify().is_err());
        assert!(MorphSequence::new().expand(2).verify().is_err());
        assert!(MorphSequence::new().reduce_rank(&[1, 1]).expand(4).verify().is_ok());
    }

    #[test]
    fn test_net_reduction() {
        let seq = MorphSequence::new().reduce_rank(&[1, 1]).dilate(3, 3);
        assert_eq!(seq.net_reduction(), 2);
        assert_eq!(seq.to_string(), "r11 + d3.3");
    }

    #[test]
    fn test_morph_sequence_dimensions() {
        let mut r = BinaryRaster::new(256, 128).unwrap();
        r.fill_rect(0, 0, 128, 128, 1);
        let seq = MorphSequence::new().reduce_rank(&[1, 1, 4, 3]).open(5, 5).expand(4);
        let out = morph_sequence(&r, &seq).unwrap();
        assert_eq!(out.dimensions(), (64, 32));
        // The solid left half survives as a solid block at 1/4 resolution.
        assert_eq!(out.get_pixel(10, 10), Some(1));
        assert_eq!(out.get_pixel(50, 10), Some(0));
    }

    #[test]
    fn test_morph_sequence_empty_error() {
        let r = BinaryRaster::new(8, 8).unwrap();
        assert!(morph_sequence(&r, &MorphSequence::new()).is_err());
    }
}
