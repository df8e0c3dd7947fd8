//! Utility functions for image processing
//!
//! This module provides helpers for finder-pattern location:
//! - Binarization (adaptive local mean)
//! - Morphology (square-element dilation, erosion and closing)
//! - Geometry (angles, length comparison, polygon simplification)

pub mod binarization;
pub mod geometry;
pub mod morphology;
