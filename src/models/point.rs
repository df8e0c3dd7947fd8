use std::ops::{Add, Sub};

/// 2D image-space vertex with floating point coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point
    pub fn distance(&self, other: &Point) -> f32 {
        (*self - *other).norm()
    }

    /// Calculate squared distance (faster, no sqrt)
    pub fn distance_squared(&self, other: &Point) -> f32 {
        (*self - *other).norm_squared()
    }

    /// Translate point by a vector
    pub fn translate(&self, v: Vector2) -> Self {
        *self + v
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x as f32, y as f32)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// Displacement between two points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vector2 {
    /// Create a new vector
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Dot product
    pub fn dot(&self, other: &Vector2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Signed 2D cross product (z component of the 3D cross product)
    pub fn cross(&self, other: &Vector2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Euclidean length
    pub fn norm(&self) -> f32 {
        self.norm_squared().sqrt()
    }

    /// Squared length
    pub fn norm_squared(&self) -> f32 {
        self.dot(self)
    }
}

impl Sub for Point {
    type Output = Vector2;

    fn sub(self, rhs: Point) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vector2> for Point {
    type Output = Point;

    fn add(self, rhs: Vector2) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}
