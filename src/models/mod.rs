/// Polygon edges and circular edge sets
pub mod edge;
/// Oriented finder pattern result
pub mod finder_pattern;
/// Binary image storage
pub mod matrix;
/// Vertices and displacement vectors
pub mod point;

pub use edge::{Edge, EdgeSet};
pub use finder_pattern::FinderPattern;
pub use matrix::BitMatrix;
pub use point::{Point, Vector2};
