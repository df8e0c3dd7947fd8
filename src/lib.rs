//! dm_locator - datamatrix finder-pattern locator
//!
//! Finds the "L"-shaped border corners of datamatrix symbols in grayscale
//! images of sample holders. The pipeline is adaptive thresholding and
//! morphological closing, contour tracing with polygon simplification, a
//! cascade of geometric filters, and corner extraction. Decoding the symbol
//! is left to the caller.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Locator parameters and defaults
pub mod config;
/// Finder-pattern detection (contours, filters, corner extraction)
pub mod detector;
/// Error types
pub mod error;
/// Core data structures (Point, Vector2, BitMatrix, EdgeSet, FinderPattern)
pub mod models;
/// Preprocessing and per-contour classification
pub mod pipeline;
/// Image loading and statistics used by the CLI
pub mod tools;
/// Utility functions (binarization, morphology, geometry)
pub mod utils;

pub use config::{LocatorParams, Polarity};
pub use error::{FinderPatternError, LocateError};
pub use models::{BitMatrix, Edge, EdgeSet, FinderPattern, Point, Vector2};
pub use pipeline::LocateReport;

use detector::contour::{BorderFollowingExtractor, ContourExtractor};
use image::GrayImage;
use rayon::prelude::*;

/// Locate datamatrix finder patterns in a grayscale image
///
/// # Arguments
/// * `gray` - Grayscale bytes (1 byte per pixel, row major)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `block_size` - Adaptive threshold window side, odd and > 1
/// * `c` - Offset subtracted from the local mean
/// * `close_size` - Side of the square closing element, >= 1
///
/// # Returns
/// One finder pattern per contour that survived the filter cascade, in
/// contour order. Invalid parameters are reported before any processing.
pub fn locate(
    gray: &[u8],
    width: usize,
    height: usize,
    block_size: u32,
    c: f32,
    close_size: u32,
) -> Result<Vec<FinderPattern>, LocateError> {
    locate_with_params(gray, width, height, &LocatorParams::new(block_size, c, close_size))
}

/// Locate finder patterns using a full parameter set
pub fn locate_with_params(
    gray: &[u8],
    width: usize,
    height: usize,
    params: &LocatorParams,
) -> Result<Vec<FinderPattern>, LocateError> {
    locate_with_report(gray, width, height, params).map(|r| r.patterns)
}

/// Locate finder patterns and return per-stage counters alongside them
pub fn locate_with_report(
    gray: &[u8],
    width: usize,
    height: usize,
    params: &LocatorParams,
) -> Result<LocateReport, LocateError> {
    let extractor = BorderFollowingExtractor::new(params.simplify_epsilon);
    pipeline::run(gray, width, height, params, &extractor)
}

/// Locate finder patterns in an `image` crate grayscale buffer
pub fn locate_image(image: &GrayImage, params: &LocatorParams) -> Result<Vec<FinderPattern>, LocateError> {
    let (w, h) = image.dimensions();
    locate_with_params(image.as_raw(), w as usize, h as usize, params)
}

/// Locate finder patterns in many images at once, one rayon task per image.
///
/// Results are in input order; a bad image does not affect the others.
pub fn locate_batch(
    images: &[GrayImage],
    params: &LocatorParams,
) -> Vec<Result<Vec<FinderPattern>, LocateError>> {
    images
        .par_iter()
        .map(|img| locate_image(img, params))
        .collect()
}

/// Locator holding its parameters and contour extractor
pub struct Locator<E: ContourExtractor = BorderFollowingExtractor> {
    params: LocatorParams,
    extractor: E,
}

impl Locator<BorderFollowingExtractor> {
    /// Create a locator using border following for contour extraction
    pub fn new(params: LocatorParams) -> Self {
        let extractor = BorderFollowingExtractor::new(params.simplify_epsilon);
        Self { params, extractor }
    }

    /// Create a locator configured from `DM_*` environment variables
    pub fn from_env() -> Self {
        Self::new(LocatorParams::from_env())
    }
}

impl Default for Locator<BorderFollowingExtractor> {
    fn default() -> Self {
        Self::new(LocatorParams::default())
    }
}

impl<E: ContourExtractor> Locator<E> {
    /// Create a locator with a custom contour extractor
    pub fn with_extractor(params: LocatorParams, extractor: E) -> Self {
        Self { params, extractor }
    }

    /// Current parameters
    pub fn params(&self) -> &LocatorParams {
        &self.params
    }

    /// Locate finder patterns in a grayscale buffer
    pub fn locate(&self, gray: &[u8], width: usize, height: usize) -> Result<Vec<FinderPattern>, LocateError> {
        self.locate_with_report(gray, width, height).map(|r| r.patterns)
    }

    /// Locate finder patterns in an `image` crate grayscale buffer
    pub fn locate_image(&self, image: &GrayImage) -> Result<Vec<FinderPattern>, LocateError> {
        let (w, h) = image.dimensions();
        self.locate(image.as_raw(), w as usize, h as usize)
    }

    /// Locate finder patterns and return per-stage counters
    pub fn locate_with_report(
        &self,
        gray: &[u8],
        width: usize,
        height: usize,
    ) -> Result<LocateReport, LocateError> {
        pipeline::run(gray, width, height, &self.params, &self.extractor)
    }
}
