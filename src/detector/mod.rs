//! Datamatrix finder-pattern detection
//!
//! This module turns a binary image into oriented finder patterns:
//! - Contour extraction (border following plus polygon simplification)
//! - Geometric filter cascade over edge sets
//! - Corner extraction from surviving edge sets

/// Contour tracing seam and the default border-following extractor
pub mod contour;
/// Filter cascade and the shared longest-edge-pair helper
pub mod filters;
/// Oriented corner extraction
pub mod finder;
