//! Size-based box selection

use super::Box;

/// How width and height criteria combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSelectType {
    /// Select if BOTH width and height satisfy the relation
    IfBoth,
    /// Select if EITHER width or height satisfies the relation
    IfEither,
}

/// Comparison applied against the size thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSelectRelation {
    /// Select if greater than or equal to threshold
    Gte,
    /// Select if less than or equal to threshold
    Lte,
}

impl SizeSelectRelation {
    #[inline]
    fn holds(self, value: i32, thresh: i32) -> bool {
        match self {
            SizeSelectRelation::Gte => value >= thresh,
            SizeSelectRelation::Lte => value <= thresh,
        }
    }
}

impl Box {
    /// Test the box dimensions against width/height thresholds.
    pub fn satisfies_size(
        &self,
        width: i32,
        height: i32,
        select_type: SizeSelectType,
        relation: SizeSelectRelation,
    ) -> bool {
        let w_ok = relation.holds(self.w, width);
        let h_ok = relation.holds(self.h, height);
        match select_type {
            SizeSelectType::IfBoth => w_ok && h_ok,
            SizeSelectType::IfEither => w_ok || h_ok,
        }
    }
}
