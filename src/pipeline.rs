use log::{debug, trace, warn};
use rayon::prelude::*;

use crate::config::LocatorParams;
use crate::detector::contour::ContourExtractor;
use crate::detector::filters::{FilterCascade, FilterStage};
use crate::detector::finder::FinderExtractor;
use crate::error::{FinderPatternError, LocateError};
use crate::models::{BitMatrix, EdgeSet, FinderPattern, Point};
use crate::utils::binarization::adaptive_mean_binarize;
use crate::utils::morphology::close;

/// Counters and results from one locate call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocateReport {
    /// Finder patterns in contour order
    pub patterns: Vec<FinderPattern>,
    /// Number of simplified contours examined
    pub contours: usize,
    /// Rejections per filter stage, indexed by [`FilterStage::index`]
    pub rejected: [usize; 4],
    /// Survivors whose corner could not be extracted
    pub corner_failures: usize,
}

impl LocateReport {
    /// Rejection count for one stage
    pub fn rejected_by(&self, stage: FilterStage) -> usize {
        self.rejected[stage.index()]
    }
}

/// What happened to one contour.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CandidateOutcome {
    Pattern(FinderPattern),
    Rejected(FilterStage),
    Failed(FinderPatternError),
}

/// Adaptive threshold followed by one closing pass.
pub fn preprocess(gray: &[u8], width: usize, height: usize, params: &LocatorParams) -> BitMatrix {
    let binary = adaptive_mean_binarize(
        gray,
        width,
        height,
        params.block_size as usize,
        params.c,
        params.polarity,
    );
    close(&binary, params.close_size as usize)
}

pub(crate) fn classify(polygon: &[Point], cascade: &FilterCascade) -> CandidateOutcome {
    let edges = EdgeSet::from_vertices(polygon);
    match cascade.evaluate(&edges) {
        Ok(pair) => match FinderExtractor::extract(&edges, Some(pair)) {
            Ok(fp) => CandidateOutcome::Pattern(fp),
            Err(err) => CandidateOutcome::Failed(err),
        },
        Err(stage) => CandidateOutcome::Rejected(stage),
    }
}

/// Run the filter cascade and corner extraction over already simplified
/// polygons. Per-contour failures are logged and counted, never returned.
pub fn locate_in_polygons(polygons: &[Vec<Point>], parallel: bool) -> LocateReport {
    locate_in_polygons_with(polygons, &FilterCascade::default(), parallel)
}

/// [`locate_in_polygons`] with a caller-chosen cascade
pub fn locate_in_polygons_with(
    polygons: &[Vec<Point>],
    cascade: &FilterCascade,
    parallel: bool,
) -> LocateReport {
    let outcomes: Vec<CandidateOutcome> = if parallel {
        polygons.par_iter().map(|p| classify(p, cascade)).collect()
    } else {
        polygons.iter().map(|p| classify(p, cascade)).collect()
    };

    let mut report = LocateReport {
        contours: polygons.len(),
        ..LocateReport::default()
    };

    for (idx, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            CandidateOutcome::Pattern(fp) => report.patterns.push(fp),
            CandidateOutcome::Rejected(stage) => {
                trace!("contour {} rejected by {} filter", idx, stage.name());
                report.rejected[stage.index()] += 1;
            }
            CandidateOutcome::Failed(err) => {
                warn!("contour {} skipped: {}", idx, err);
                report.corner_failures += 1;
            }
        }
    }

    report
}

/// Full pipeline with an explicit contour extractor.
pub fn run<E: ContourExtractor + ?Sized>(
    gray: &[u8],
    width: usize,
    height: usize,
    params: &LocatorParams,
    extractor: &E,
) -> Result<LocateReport, LocateError> {
    params.validate()?;
    let expected = width
        .checked_mul(height)
        .ok_or(LocateError::DimensionsOverflow { width, height })?;
    if gray.len() != expected {
        return Err(LocateError::BufferSizeMismatch {
            expected,
            actual: gray.len(),
        });
    }

    let binary = preprocess(gray, width, height, params);
    let polygons = extractor.extract(&binary);
    let report = locate_in_polygons(&polygons, params.parallel);

    debug!(
        "locate {}x{}: {} contours, {} patterns, rejected {:?}, {} corner failures",
        width,
        height,
        report.contours,
        report.patterns.len(),
        report.rejected,
        report.corner_failures
    );

    Ok(report)
}
