use imageproc::contours::find_contours;

use crate::config::DEFAULT_SIMPLIFY_EPSILON;
use crate::models::{BitMatrix, Point};
use crate::utils::geometry::approximate_closed_polygon;

/// Source of closed polygons traced from a binary image.
///
/// Each returned polygon is an ordered vertex list; every list from one call
/// uses the same traversal direction. Nesting between contours is not
/// reported.
pub trait ContourExtractor {
    /// Trace and simplify every closed boundary in `binary`
    fn extract(&self, binary: &BitMatrix) -> Vec<Vec<Point>>;
}

/// Suzuki-Abe border following followed by Douglas-Peucker simplification.
///
/// Both outer borders and hole borders are returned, in the order the tracer
/// discovers them (raster scan).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderFollowingExtractor {
    /// Maximum distance between a traced boundary and its polygon
    pub epsilon: f32,
}

impl BorderFollowingExtractor {
    /// Create an extractor with the given simplification tolerance
    pub fn new(epsilon: f32) -> Self {
        Self { epsilon }
    }
}

impl Default for BorderFollowingExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_SIMPLIFY_EPSILON)
    }
}

impl ContourExtractor for BorderFollowingExtractor {
    fn extract(&self, binary: &BitMatrix) -> Vec<Vec<Point>> {
        if binary.width() == 0 || binary.height() == 0 {
            return Vec::new();
        }
        let gray = binary.to_gray_image();
        find_contours::<i32>(&gray)
            .into_iter()
            .map(|contour| {
                let traced: Vec<Point> = contour
                    .points
                    .into_iter()
                    .map(|p| Point::from((p.x, p.y)))
                    .collect();
                approximate_closed_polygon(&traced, self.epsilon)
            })
            .collect()
    }
}

/// Extractor returning a fixed set of polygons, ignoring the image.
///
/// Lets callers run the filter cascade on polygons obtained elsewhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrecomputedContours {
    polygons: Vec<Vec<Point>>,
}

impl PrecomputedContours {
    /// Wrap already simplified polygons
    pub fn new(polygons: Vec<Vec<Point>>) -> Self {
        Self { polygons }
    }
}

impl ContourExtractor for PrecomputedContours {
    fn extract(&self, _binary: &BitMatrix) -> Vec<Vec<Point>> {
        self.polygons.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_square_traces_to_four_corners() {
        let binary = BitMatrix::from_fn(40, 40, |x, y| (10..30).contains(&x) && (10..30).contains(&y));
        let polygons = BorderFollowingExtractor::default().extract(&binary);
        assert_eq!(polygons.len(), 1);
        let poly = &polygons[0];
        assert_eq!(poly.len(), 4, "got {:?}", poly);
        for corner in [(10.0, 10.0), (29.0, 10.0), (29.0, 29.0), (10.0, 29.0)] {
            assert!(poly.contains(&Point::new(corner.0, corner.1)), "missing {:?}", corner);
        }
    }

    #[test]
    fn test_ring_yields_outer_and_hole_border() {
        let binary = BitMatrix::from_fn(50, 50, |x, y| {
            let outer = (5..45).contains(&x) && (5..45).contains(&y);
            let inner = (15..35).contains(&x) && (15..35).contains(&y);
            outer && !inner
        });
        let polygons = BorderFollowingExtractor::default().extract(&binary);
        assert_eq!(polygons.len(), 2);
    }

    #[test]
    fn test_empty_image() {
        assert!(BorderFollowingExtractor::default()
            .extract(&BitMatrix::new(0, 0))
            .is_empty());
        assert!(BorderFollowingExtractor::default()
            .extract(&BitMatrix::new(10, 10))
            .is_empty());
    }
}
