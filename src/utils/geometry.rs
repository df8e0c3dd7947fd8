//! Geometry utilities: vector angles, length comparison and polygon simplification

use crate::models::{Point, Vector2};
use imageproc::geometry::approximate_polygon_dp;
use imageproc::point::Point as DpPoint;

/// Calculate distance between two points
pub fn distance(p1: &Point, p2: &Point) -> f32 {
    p1.distance(p2)
}

/// Cosine of the angle between two vectors.
///
/// Returns NaN if either vector has zero length.
pub fn cosine(a: &Vector2, b: &Vector2) -> f32 {
    a.dot(b) / (a.norm() * b.norm())
}

/// `|a - b| / |a + b|`; NaN when both are zero
pub fn relative_difference(a: f32, b: f32) -> f32 {
    (a - b).abs() / (a + b).abs()
}

/// Douglas-Peucker over an open polyline; both endpoints are kept.
fn simplify_open(points: &[Point], epsilon: f32) -> Vec<Point> {
    let curve: Vec<DpPoint<f32>> = points.iter().map(|p| DpPoint::new(p.x, p.y)).collect();
    approximate_polygon_dp(&curve, epsilon as f64, false)
        .into_iter()
        .map(|p| Point::new(p.x, p.y))
        .collect()
}

/// Approximate a closed contour by a polygon whose vertices lie on the
/// contour and which deviates from it by at most `epsilon`.
///
/// The contour is split at its first point and the point farthest from it,
/// and each half is simplified independently. Output vertices keep the
/// traversal order of the input. A non-positive `epsilon` keeps every point.
pub fn approximate_closed_polygon(contour: &[Point], epsilon: f32) -> Vec<Point> {
    let n = contour.len();
    if n < 3 || epsilon <= 0.0 {
        return contour.to_vec();
    }

    let anchor = contour[0];
    let mut split = 0usize;
    let mut max_dist = 0.0f32;
    for (i, p) in contour.iter().enumerate().skip(1) {
        let d = p.distance_squared(&anchor);
        if d > max_dist {
            max_dist = d;
            split = i;
        }
    }
    if split == 0 {
        // Every point coincides with the anchor.
        return vec![anchor];
    }

    // Second half wraps back to the anchor.
    let mut ring: Vec<Point> = contour.to_vec();
    ring.push(anchor);

    let mut polygon = simplify_open(&ring[..=split], epsilon);
    // Both halves contain the split point; the second also ends on the anchor.
    polygon.pop();
    polygon.extend(simplify_open(&ring[split..], epsilon));
    polygon.pop();
    polygon
}
