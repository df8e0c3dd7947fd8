//! End-to-end tests for finder-pattern location on synthetic images and
//! synthetic contours.

mod common;

use common::synthetic_image::{fill_polygons_u8, notched_block, rotate};
use dm_locator::detector::contour::PrecomputedContours;
use dm_locator::detector::filters::FilterStage;
use dm_locator::pipeline::locate_in_polygons;
use dm_locator::{
    FinderPattern, LocateError, Locator, LocatorParams, Point, locate, locate_batch,
    locate_with_params,
};
use image::GrayImage;

const DARK: u8 = 20;
const LIGHT: u8 = 230;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Window large enough that whole blocks binarize as solid foreground.
fn params() -> LocatorParams {
    LocatorParams::new(201, 16.0, 3)
}

fn polygon(raw: &[(i32, i32)]) -> Vec<Point> {
    raw.iter().copied().map(Point::from).collect()
}

fn assert_invariants(fp: &FinderPattern) {
    assert!(fp.cross() > 0.0, "orientation violated: {:?}", fp);
    assert!(fp.cosine().abs() < 0.1 + 1e-4, "not orthogonal: {:?}", fp);
    assert!(fp.length_ratio() < 0.1 + 1e-4, "lengths differ: {:?}", fp);
}

#[test]
fn perfect_square_contour_has_no_pattern() {
    let square = polygon(&[(0, 0), (10, 0), (10, 10), (0, 10)]);
    let report = locate_in_polygons(&[square], false);
    assert!(report.patterns.is_empty());
    assert_eq!(report.rejected_by(FilterStage::NonTrivial), 1);
}

#[test]
fn notched_square_contour_yields_one_pattern() {
    let notched = polygon(&[
        (0, 0),
        (40, 0),
        (40, 10),
        (30, 10),
        (30, 25),
        (20, 25),
        (20, 40),
        (0, 40),
    ]);
    let report = locate_in_polygons(&[notched], false);
    assert_eq!(report.patterns.len(), 1);
    let fp = report.patterns[0];
    assert_eq!(fp.corner, Point::new(0.0, 0.0));
    assert!(fp.cross() > 0.0);
    assert_invariants(&fp);
}

#[test]
fn thin_rectangle_contour_rejected_as_non_adjacent() {
    let rect = polygon(&[
        (0, 0),
        (100, 0),
        (100, 3),
        (100, 7),
        (100, 10),
        (0, 10),
        (0, 7),
        (0, 3),
    ]);
    let locator = Locator::with_extractor(params(), PrecomputedContours::new(vec![rect]));
    let report = locator.locate_with_report(&[LIGHT; 4], 2, 2).unwrap();
    assert!(report.patterns.is_empty());
    assert_eq!(report.rejected_by(FilterStage::LongestAdjacent), 1);
}

#[test]
fn small_polygons_never_produce_patterns() {
    let polygons = vec![
        Vec::new(),
        polygon(&[(3, 3)]),
        polygon(&[(0, 0), (5, 0)]),
        polygon(&[(0, 0), (9, 0), (0, 9)]),
        // "L" whose longest sides would pass every other filter.
        polygon(&[(0, 0), (40, 0), (40, 10), (10, 10), (10, 40), (0, 40)]),
    ];
    let report = locate_in_polygons(&polygons, true);
    assert!(report.patterns.is_empty());
    assert_eq!(report.rejected_by(FilterStage::NonTrivial), polygons.len());
}

#[test]
fn two_blocks_in_image_give_two_patterns() {
    init_logging();
    let (w, h) = (400usize, 300usize);
    let gray = fill_polygons_u8(
        w,
        h,
        &[notched_block(40.0, 40.0), notched_block(240.0, 150.0)],
        DARK,
        LIGHT,
    );

    let patterns = locate(&gray, w, h, 201, 16.0, 3).unwrap();
    assert_eq!(patterns.len(), 2, "got {:?}", patterns);

    let mut corners: Vec<Point> = patterns.iter().map(|p| p.corner).collect();
    corners.sort_by(|a, b| a.x.total_cmp(&b.x));
    assert_eq!(corners, vec![Point::new(40.0, 40.0), Point::new(240.0, 150.0)]);

    for fp in &patterns {
        assert_invariants(fp);
        // Top side runs along +x, left side along +y (pixel centres span 79).
        assert!((fp.base_vector.x - 79.0).abs() < 1.5 && fp.base_vector.y.abs() < 1.5);
        assert!((fp.side_vector.y - 79.0).abs() < 1.5 && fp.side_vector.x.abs() < 1.5);
    }
}

fn assert_corners_near(patterns: &[FinderPattern], expected: &[(f32, f32)]) {
    let mut corners: Vec<Point> = patterns.iter().map(|p| p.corner).collect();
    corners.sort_by(|a, b| a.x.total_cmp(&b.x));
    assert_eq!(corners.len(), expected.len());
    for (got, &(x, y)) in corners.iter().zip(expected) {
        assert!(
            (got.x - x).abs() <= 1.0 && (got.y - y).abs() <= 1.0,
            "corner {:?} not within a pixel of ({}, {})",
            got,
            x,
            y
        );
    }
}

#[test]
fn two_blocks_at_default_params() {
    init_logging();
    let (w, h) = (400usize, 300usize);
    let gray = fill_polygons_u8(
        w,
        h,
        &[notched_block(40.0, 40.0), notched_block(240.0, 150.0)],
        DARK,
        LIGHT,
    );

    // A 35 px window only marks the block outlines, so each block also
    // traces an inner hole border, which is too simple to pass.
    let report = Locator::default().locate_with_report(&gray, w, h).unwrap();
    assert_eq!(report.contours, 4);
    assert_eq!(report.rejected_by(FilterStage::NonTrivial), 2);
    assert_eq!(report.corner_failures, 0);
    assert_eq!(report.patterns.len(), 2, "got {:?}", report.patterns);
    for fp in &report.patterns {
        assert_invariants(fp);
    }
    assert_corners_near(&report.patterns, &[(40.0, 40.0), (240.0, 150.0)]);
}

#[test]
fn two_blocks_with_odd_closing() {
    let (w, h) = (400usize, 300usize);
    let gray = fill_polygons_u8(
        w,
        h,
        &[notched_block(40.0, 40.0), notched_block(240.0, 150.0)],
        DARK,
        LIGHT,
    );
    let report =
        dm_locator::locate_with_report(&gray, w, h, &LocatorParams::new(101, 10.0, 3)).unwrap();
    assert_eq!(report.contours, 2);
    assert_eq!(report.patterns.len(), 2, "got {:?}", report.patterns);
    for fp in &report.patterns {
        assert_invariants(fp);
    }
    assert_corners_near(&report.patterns, &[(40.0, 40.0), (240.0, 150.0)]);
}

#[test]
fn overflowing_dimensions_are_an_error() {
    assert!(matches!(
        locate(&[], usize::MAX, 2, 35, 16.0, 2),
        Err(LocateError::DimensionsOverflow { .. })
    ));
}

#[test]
fn locate_is_idempotent() {
    let (w, h) = (400usize, 300usize);
    let gray = fill_polygons_u8(
        w,
        h,
        &[notched_block(40.0, 40.0), notched_block(240.0, 150.0)],
        DARK,
        LIGHT,
    );
    let first = locate(&gray, w, h, 201, 16.0, 3).unwrap();
    let second = locate(&gray, w, h, 201, 16.0, 3).unwrap();
    assert_eq!(first, second);

    let serial = locate_with_params(&gray, w, h, &params().with_parallel(false)).unwrap();
    assert_eq!(first, serial);
}

#[test]
fn rotated_block_keeps_invariants() {
    init_logging();
    let (w, h) = (200usize, 200usize);
    let block = rotate(&notched_block(60.0, 60.0), 100.0, 100.0, 20.0);
    let gray = fill_polygons_u8(w, h, &[block], DARK, LIGHT);

    let patterns = locate_with_params(&gray, w, h, &params()).unwrap();
    assert_eq!(patterns.len(), 1, "got {:?}", patterns);
    let fp = patterns[0];
    assert_invariants(&fp);

    // Corner lands near the rotated top-left of the block.
    let expected = rotate(&[(60.0, 60.0)], 100.0, 100.0, 20.0)[0];
    assert!(fp.corner.distance(&Point::new(expected.0, expected.1)) < 3.0);
}

#[test]
fn plain_blocks_are_not_patterns() {
    let (w, h) = (300usize, 200usize);
    let square = vec![(20.0, 20.0), (80.0, 20.0), (80.0, 80.0), (20.0, 80.0)];
    let bar = vec![(100.0, 100.0), (280.0, 100.0), (280.0, 118.0), (100.0, 118.0)];
    let gray = fill_polygons_u8(w, h, &[square, bar], DARK, LIGHT);
    assert!(locate_with_params(&gray, w, h, &params()).unwrap().is_empty());
}

#[test]
fn invalid_parameters_are_rejected_before_processing() {
    let gray = vec![LIGHT; 16];
    assert!(matches!(
        locate(&gray, 4, 4, 8, 2.0, 3),
        Err(LocateError::InvalidBlockSize { block_size: 8 })
    ));
    assert!(matches!(
        locate(&gray, 4, 4, 1, 2.0, 3),
        Err(LocateError::InvalidBlockSize { block_size: 1 })
    ));
    assert!(matches!(
        locate(&gray, 4, 4, 5, 2.0, 0),
        Err(LocateError::InvalidCloseSize { close_size: 0 })
    ));
}

#[test]
fn batch_keeps_input_order() {
    let (w, h) = (200u32, 200u32);
    let with_block = fill_polygons_u8(
        w as usize,
        h as usize,
        &[notched_block(60.0, 60.0)],
        DARK,
        LIGHT,
    );
    let images = vec![
        GrayImage::from_pixel(w, h, image::Luma([LIGHT])),
        GrayImage::from_raw(w, h, with_block).unwrap(),
    ];
    let results = locate_batch(&images, &params());
    assert_eq!(results.len(), 2);
    assert!(results[0].as_ref().unwrap().is_empty());
    assert_eq!(results[1].as_ref().unwrap().len(), 1);
}
