//! Mutable connectivity graph over a [`ShapeMap`].
//!
//! [`ShapeGraph`] is the only place neighbour sets and the edge list change, so the two
//! stay consistent: every edge in the list has both endpoints recorded in each other's
//! neighbour set, and vice versa.
use crate::shape::{Shape, ShapeMap};

/// Undirected connection between two shape keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    /// Whether this edge joins `x` and `y`, in either orientation.
    pub fn connects(&self, x: usize, y: usize) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}

/// Graph view that owns a shape map while edges are being built.
pub struct ShapeGraph {
    shapes: ShapeMap,
    edges: Vec<Edge>,
}

impl ShapeGraph {
    /// Wraps `shapes`, discarding any connections they already carry.
    pub fn new(mut shapes: ShapeMap) -> Self {
        shapes.clear_neighbours();
        Self {
            shapes,
            edges: Vec::new(),
        }
    }

    pub fn shapes(&self) -> &ShapeMap {
        &self.shapes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn degree(&self, key: usize) -> usize {
        self.shapes.get(key).map(Shape::degree).unwrap_or(0)
    }

    /// Connects `a` and `b`. Returns `false` without changes for self-loops, unknown keys
    /// or pairs that are already connected.
    pub fn add_edge(&mut self, a: usize, b: usize) -> bool {
        if a == b || !self.shapes.contains_key(a) || !self.shapes.contains_key(b) {
            return false;
        }
        if self.shapes.get(a).is_some_and(|s| s.is_connected_to(b)) {
            return false;
        }
        if let Some(shape) = self.shapes.get_mut(a) {
            shape.link(b);
        }
        if let Some(shape) = self.shapes.get_mut(b) {
            shape.link(a);
        }
        self.edges.push(Edge::new(a, b));
        true
    }

    /// Disconnects `a` and `b`, dropping the edge in either orientation. Returns `false`
    /// if they were not connected.
    pub fn remove_edge(&mut self, a: usize, b: usize) -> bool {
        let unlinked_a = self.shapes.get_mut(a).is_some_and(|s| s.unlink(b));
        let unlinked_b = self.shapes.get_mut(b).is_some_and(|s| s.unlink(a));
        if !(unlinked_a || unlinked_b) {
            return false;
        }
        self.edges.retain(|e| !e.connects(a, b));
        true
    }

    pub fn into_parts(self) -> (ShapeMap, Vec<Edge>) {
        (self.shapes, self.edges)
    }
}
