use super::point::{Point, Vector2};
use crate::utils::geometry::distance;

/// Ordered pair of vertices. Direction matters only for adjacency bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Start vertex
    pub tail: Point,
    /// End vertex
    pub head: Point,
}

impl Edge {
    /// Create an edge from `tail` to `head`
    pub fn new(tail: Point, head: Point) -> Self {
        Self { tail, head }
    }

    /// Euclidean length
    pub fn length(&self) -> f32 {
        distance(&self.tail, &self.head)
    }

    /// Direction vector from tail to head
    pub fn vector(&self) -> Vector2 {
        self.head - self.tail
    }

    /// Return a vertex shared with `other`, if any
    pub fn shared_vertex(&self, other: &Edge) -> Option<Point> {
        [self.tail, self.head]
            .into_iter()
            .find(|v| *v == other.tail || *v == other.head)
    }

    /// Return the endpoint which is not `vertex`
    pub fn other_vertex(&self, vertex: Point) -> Option<Point> {
        [self.tail, self.head].into_iter().find(|v| *v != vertex)
    }
}

/// Circular sequence of edges describing a closed polygon.
///
/// Edge `i`'s head is edge `(i + 1) % n`'s tail.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EdgeSet {
    edges: Vec<Edge>,
}

impl EdgeSet {
    /// Pair every vertex with its successor, wrapping the last to the first.
    ///
    /// Fewer than two vertices produce an empty set.
    pub fn from_vertices(vertices: &[Point]) -> Self {
        let n = vertices.len();
        if n < 2 {
            return Self::default();
        }
        let edges = (0..n)
            .map(|i| Edge::new(vertices[i], vertices[(i + 1) % n]))
            .collect();
        Self { edges }
    }

    /// Number of edges
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// True when the set has no edges
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edge at `index`
    pub fn get(&self, index: usize) -> Option<&Edge> {
        self.edges.get(index)
    }

    /// All edges in circular order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Length of every edge, in order
    pub fn lengths(&self) -> Vec<f32> {
        self.edges.iter().map(Edge::length).collect()
    }

    /// True if `i` and `j` are neighbours in the circular sequence
    pub fn are_adjacent(&self, i: usize, j: usize) -> bool {
        let n = self.edges.len();
        let diff = i.abs_diff(j);
        n > 1 && (diff == 1 || diff == n - 1)
    }
}
