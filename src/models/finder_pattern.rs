use super::point::{Point, Vector2};

/// Oriented corner of a datamatrix "L" border.
///
/// `base_vector` and `side_vector` start at `corner` and run along the two
/// longest perimeter edges. `base_vector.cross(side_vector)` is positive.
///
/// ```text
///       ^side
///       |
///       |   base
///       X--->
///  corner
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinderPattern {
    /// Vertex shared by the two longest edges
    pub corner: Point,
    /// Vector to the far end of the first border edge
    pub base_vector: Vector2,
    /// Vector to the far end of the second border edge
    pub side_vector: Vector2,
}

impl FinderPattern {
    /// Create a finder pattern
    pub fn new(corner: Point, base_vector: Vector2, side_vector: Vector2) -> Self {
        Self {
            corner,
            base_vector,
            side_vector,
        }
    }

    /// Far end of the base edge
    pub fn base_end(&self) -> Point {
        self.corner.translate(self.base_vector)
    }

    /// Far end of the side edge
    pub fn side_end(&self) -> Point {
        self.corner.translate(self.side_vector)
    }

    /// Fourth corner of the parallelogram spanned by the two vectors
    pub fn opposite_corner(&self) -> Point {
        self.base_end().translate(self.side_vector)
    }

    /// Corners in drawing order: corner, base end, opposite, side end
    pub fn polygon(&self) -> [Point; 4] {
        [
            self.corner,
            self.base_end(),
            self.opposite_corner(),
            self.side_end(),
        ]
    }

    /// Signed cross product `base × side`
    pub fn cross(&self) -> f32 {
        self.base_vector.cross(&self.side_vector)
    }

    /// Cosine of the angle between the two vectors
    pub fn cosine(&self) -> f32 {
        crate::utils::geometry::cosine(&self.base_vector, &self.side_vector)
    }

    /// `|len(base) - len(side)| / (len(base) + len(side))`
    pub fn length_ratio(&self) -> f32 {
        crate::utils::geometry::relative_difference(
            self.base_vector.norm(),
            self.side_vector.norm(),
        )
    }
}
