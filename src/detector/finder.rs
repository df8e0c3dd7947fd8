//! Reduce a filtered edge set to its oriented "L" corner

use crate::detector::filters::LongestPair;
use crate::error::FinderPatternError;
use crate::models::{EdgeSet, FinderPattern};

/// Corner extraction for edge sets that passed the filter cascade.
pub struct FinderExtractor;

impl FinderExtractor {
    /// Build the finder pattern at the corner between the two longest edges.
    ///
    /// Meant for edge sets that passed the filter cascade; `pair` may be the
    /// cascade's result or `None` to recompute it.
    pub fn extract(
        edges: &EdgeSet,
        pair: Option<LongestPair>,
    ) -> Result<FinderPattern, FinderPatternError> {
        let pair = match pair.or_else(|| LongestPair::find(edges)) {
            Some(p) => p,
            None => return Err(FinderPatternError::TooFewEdges { edges: edges.len() }),
        };
        let (Some(first), Some(second)) = (edges.get(pair.first), edges.get(pair.second)) else {
            return Err(FinderPatternError::TooFewEdges { edges: edges.len() });
        };

        let corner = first
            .shared_vertex(second)
            .ok_or(FinderPatternError::CornerNotFound {
                first: pair.first,
                second: pair.second,
            })?;

        let far_first = first
            .other_vertex(corner)
            .ok_or(FinderPatternError::DegenerateEdge { index: pair.first })?;
        let far_second = second
            .other_vertex(corner)
            .ok_or(FinderPatternError::DegenerateEdge { index: pair.second })?;

        let v1 = far_first - corner;
        let v2 = far_second - corner;

        // base x side > 0 in image coordinates (y down).
        let (base, side) = if v1.cross(&v2) < 0.0 { (v2, v1) } else { (v1, v2) };

        Ok(FinderPattern::new(corner, base, side))
    }
}
