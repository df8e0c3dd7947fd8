//! Error types for locating finder patterns.

use thiserror::Error;

/// Errors surfaced to callers of the locate operations.
///
/// Only bad inputs end up here. Failures that concern a single contour are
/// [`FinderPatternError`]s and are absorbed by the locator.
#[derive(Error, Debug)]
pub enum LocateError {
    /// Adaptive threshold window must be odd and greater than 1.
    #[error("block size must be odd and greater than 1, got {block_size}")]
    InvalidBlockSize {
        /// Rejected window side
        block_size: u32,
    },

    /// Closing element must be at least one pixel wide.
    #[error("close size must be at least 1, got {close_size}")]
    InvalidCloseSize {
        /// Rejected element side
        close_size: u32,
    },

    /// Polygon simplification tolerance must be finite and non-negative.
    #[error("simplify epsilon must be finite and non-negative, got {epsilon}")]
    InvalidSimplifyEpsilon {
        /// Rejected tolerance
        epsilon: f32,
    },

    /// Threshold offset must be finite.
    #[error("threshold offset C must be finite, got {c}")]
    InvalidOffset {
        /// Rejected offset
        c: f32,
    },

    /// Grayscale buffer does not match the stated dimensions.
    #[error("grayscale buffer has {actual} bytes, expected {expected}")]
    BufferSizeMismatch {
        /// `width * height`
        expected: usize,
        /// Length of the buffer passed in
        actual: usize,
    },

    /// `width * height` does not fit in `usize`.
    #[error("image dimensions {width}x{height} overflow the address space")]
    DimensionsOverflow {
        /// Stated width
        width: usize,
        /// Stated height
        height: usize,
    },

    /// Image could not be loaded.
    #[error("failed to load image: {0}")]
    Image(#[from] image::ImageError),
}

/// Why a single edge set could not be turned into a finder pattern.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FinderPatternError {
    /// Fewer than two edges to choose from.
    #[error("edge set has {edges} edges, need at least 2")]
    TooFewEdges {
        /// Edges in the set
        edges: usize,
    },

    /// The two longest edges do not meet at a common vertex.
    #[error("longest edges {first} and {second} share no vertex")]
    CornerNotFound {
        /// Index of the longest edge
        first: usize,
        /// Index of the second longest edge
        second: usize,
    },

    /// A longest edge has both endpoints on the corner.
    #[error("edge {index} has zero length")]
    DegenerateEdge {
        /// Index of the zero-length edge
        index: usize,
    },
}
