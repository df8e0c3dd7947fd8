//! Geometric filters that discard edge sets unlikely to be datamatrix perimeters

use crate::models::EdgeSet;
use crate::utils::geometry::{cosine, relative_difference};

/// Minimum edge count is strictly greater than this.
pub const MIN_EDGES_EXCLUSIVE: usize = 6;
/// Longest edges are orthogonal when `|cos θ|` is below this.
pub const ORTHOGONAL_COSINE_TOLERANCE: f32 = 0.1;
/// Longest edges are similar when `|L1 - L2| / (L1 + L2)` is below this.
pub const SIMILAR_LENGTH_TOLERANCE: f32 = 0.1;

/// Indices of the two longest edges, longest first.
///
/// Among equal lengths the lower index ranks higher, so results do not
/// depend on sort stability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongestPair {
    /// Index of the longest edge
    pub first: usize,
    /// Index of the second longest edge
    pub second: usize,
}

impl LongestPair {
    /// Find the two longest edges; `None` with fewer than two edges
    pub fn find(edges: &EdgeSet) -> Option<Self> {
        let mut best: Option<(usize, f32)> = None;
        let mut runner_up: Option<(usize, f32)> = None;

        for (i, len) in edges.lengths().into_iter().enumerate() {
            match best {
                Some((_, b)) if len <= b => match runner_up {
                    Some((_, r)) if len <= r => {}
                    _ => runner_up = Some((i, len)),
                },
                _ => {
                    runner_up = best;
                    best = Some((i, len));
                }
            }
        }

        match (best, runner_up) {
            (Some((first, _)), Some((second, _))) => Some(Self { first, second }),
            _ => None,
        }
    }
}

/// One stage of the cascade, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterStage {
    /// More than six edges
    NonTrivial,
    /// Two longest edges are neighbours in the circular sequence
    LongestAdjacent,
    /// Two longest edges are roughly perpendicular
    ApproxOrthogonal,
    /// Two longest edges have roughly the same length
    SimilarLength,
}

impl FilterStage {
    /// All stages in the order they run
    pub const ALL: [FilterStage; 4] = [
        FilterStage::NonTrivial,
        FilterStage::LongestAdjacent,
        FilterStage::ApproxOrthogonal,
        FilterStage::SimilarLength,
    ];

    /// Position in [`FilterStage::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short label for reports
    pub fn name(self) -> &'static str {
        match self {
            FilterStage::NonTrivial => "non-trivial",
            FilterStage::LongestAdjacent => "longest-adjacent",
            FilterStage::ApproxOrthogonal => "approx-orthogonal",
            FilterStage::SimilarLength => "similar-length",
        }
    }

    /// Apply this stage. `pair` is the precomputed longest pair, if any.
    pub fn keep(self, edges: &EdgeSet, pair: Option<LongestPair>) -> bool {
        match self {
            FilterStage::NonTrivial => filter_non_trivial(edges),
            FilterStage::LongestAdjacent => pair.is_some_and(|p| filter_longest_adjacent(edges, p)),
            FilterStage::ApproxOrthogonal => {
                pair.is_some_and(|p| filter_longest_approx_orthogonal(edges, p))
            }
            FilterStage::SimilarLength => {
                pair.is_some_and(|p| filter_longest_similar_in_length(edges, p))
            }
        }
    }
}

/// True iff the edge count is more than six
pub fn filter_non_trivial(edges: &EdgeSet) -> bool {
    edges.len() > MIN_EDGES_EXCLUSIVE
}

/// True iff the two longest edges are circularly adjacent
pub fn filter_longest_adjacent(edges: &EdgeSet, pair: LongestPair) -> bool {
    edges.are_adjacent(pair.first, pair.second)
}

/// True iff the two longest edges are close to perpendicular (sign agnostic)
pub fn filter_longest_approx_orthogonal(edges: &EdgeSet, pair: LongestPair) -> bool {
    let (Some(a), Some(b)) = (edges.get(pair.first), edges.get(pair.second)) else {
        return false;
    };
    // NaN from zero-length edges compares false.
    cosine(&a.vector(), &b.vector()).abs() < ORTHOGONAL_COSINE_TOLERANCE
}

/// True iff the two longest edges differ by less than 10% of their sum
pub fn filter_longest_similar_in_length(edges: &EdgeSet, pair: LongestPair) -> bool {
    let (Some(a), Some(b)) = (edges.get(pair.first), edges.get(pair.second)) else {
        return false;
    };
    relative_difference(a.length(), b.length()) < SIMILAR_LENGTH_TOLERANCE
}

/// Ordered list of filter stages evaluated with early exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCascade {
    stages: Vec<FilterStage>,
}

impl Default for FilterCascade {
    fn default() -> Self {
        Self {
            stages: FilterStage::ALL.to_vec(),
        }
    }
}

impl FilterCascade {
    /// Cascade running `stages` in the given order
    pub fn new(stages: Vec<FilterStage>) -> Self {
        Self { stages }
    }

    /// Stages in evaluation order
    pub fn stages(&self) -> &[FilterStage] {
        &self.stages
    }

    /// Run every stage in order. Returns the longest pair for survivors, or
    /// the first stage that rejected the set.
    pub fn evaluate(&self, edges: &EdgeSet) -> Result<LongestPair, FilterStage> {
        // Longest pair is computed once, lazily, after the count check.
        let mut pair: Option<LongestPair> = None;
        let mut pair_computed = false;

        for &stage in &self.stages {
            if stage != FilterStage::NonTrivial && !pair_computed {
                pair = LongestPair::find(edges);
                pair_computed = true;
            }
            if !stage.keep(edges, pair) {
                return Err(stage);
            }
        }

        match pair.or_else(|| LongestPair::find(edges)) {
            Some(p) => Ok(p),
            None => Err(FilterStage::NonTrivial),
        }
    }
}
