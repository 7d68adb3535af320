use super::handles::{FixedTriangleHandle, FixedVertexHandle, Neighbor};
use super::math;
use crate::{Kernel, LineSide, Point2, TrivialKernel};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Describes the position of a point relative to a single triangle.
///
/// Returned by [Triangle::classify].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum PositionInTriangle {
    /// The point coincides with the vertex at the given index.
    OnVertex(usize),
    /// The point lies on the edge opposite to the vertex at the given index.
    OnEdge(usize),
    /// The point lies strictly inside the triangle.
    Inside,
    /// The point lies outside of the triangle.
    Outside,
}

/// A single cell of a triangle mesh.
///
/// Vertices are stored in clockwise order: any point inside the triangle lies on the right
/// side of each directed edge `vertices[i] -> vertices[(i + 1) % 3]`.
/// The adjacency slot `i` refers to the triangle sharing the edge *opposite* to vertex `i`.
///
/// The circumcircle is derived from the vertex positions and cached.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Triangle {
    vertices: [FixedVertexHandle; 3],
    positions: [Point2<f64>; 3],
    adjacent: [Neighbor; 3],
    circumcenter: Point2<f64>,
    circumradius: f64,
}

#[inline]
pub(crate) fn ccw(index: usize) -> usize {
    (index + 1) % 3
}

#[inline]
pub(crate) fn cw(index: usize) -> usize {
    (index + 2) % 3
}

impl Triangle {
    pub(crate) fn new(vertices: [FixedVertexHandle; 3], positions: [Point2<f64>; 3]) -> Self {
        let (circumcenter, radius_2) = math::circumcenter(positions);
        Triangle {
            vertices,
            positions,
            adjacent: [Neighbor::Boundary; 3],
            circumcenter,
            circumradius: radius_2.sqrt(),
        }
    }

    /// Returns the triangle's vertices in clockwise order.
    #[inline]
    pub fn vertices(&self) -> [FixedVertexHandle; 3] {
        self.vertices
    }

    #[inline]
    pub fn vertex(&self, index: usize) -> FixedVertexHandle {
        self.vertices[index]
    }

    /// Returns the positions of the triangle's vertices in clockwise order.
    #[inline]
    pub fn positions(&self) -> [Point2<f64>; 3] {
        self.positions
    }

    #[inline]
    pub fn position(&self, index: usize) -> Point2<f64> {
        self.positions[index]
    }

    /// Returns all three adjacency slots. Slot `i` lies opposite to vertex `i`.
    #[inline]
    pub fn adjacent(&self) -> [Neighbor; 3] {
        self.adjacent
    }

    #[inline]
    pub fn neighbor(&self, index: usize) -> Neighbor {
        self.adjacent[index]
    }

    /// Returns the neighboring triangles, skipping hull edges.
    pub fn neighbors(&self) -> impl Iterator<Item = FixedTriangleHandle> + '_ {
        self.adjacent.iter().filter_map(|n| n.triangle())
    }

    pub fn circumcenter(&self) -> Point2<f64> {
        self.circumcenter
    }

    pub fn circumradius(&self) -> f64 {
        self.circumradius
    }

    pub fn area(&self) -> f64 {
        math::triangle_area(self.positions)
    }

    /// Returns the slot index of a vertex.
    pub fn index_of_vertex(&self, vertex: FixedVertexHandle) -> Option<usize> {
        self.vertices.iter().position(|v| *v == vertex)
    }

    pub fn contains_vertex(&self, vertex: FixedVertexHandle) -> bool {
        self.vertices.contains(&vertex)
    }

    /// Returns the slot index that refers to the given neighbor.
    pub fn index_of_neighbor(&self, neighbor: FixedTriangleHandle) -> Option<usize> {
        self.adjacent.iter().position(|n| n.is(neighbor))
    }

    /// Returns the vertex that lies opposite to the edge shared with `neighbor`.
    pub fn opposite_vertex_of(&self, neighbor: FixedTriangleHandle) -> Option<FixedVertexHandle> {
        self.index_of_neighbor(neighbor)
            .map(|index| self.vertices[index])
    }

    /// Returns the neighbor across the edge opposite to `vertex`.
    pub fn opposite_triangle_of(&self, vertex: FixedVertexHandle) -> Option<Neighbor> {
        self.index_of_vertex(vertex).map(|index| self.adjacent[index])
    }

    /// Returns the index of the vertex opposite to the directed edge `begin -> end`.
    ///
    /// Returns `None` if this triangle's clockwise vertex cycle does not contain that
    /// directed edge. The reversed edge `end -> begin` is not found.
    pub fn edge_index_of(&self, begin: FixedVertexHandle, end: FixedVertexHandle) -> Option<usize> {
        (0..3).find(|&i| self.vertices[ccw(i)] == begin && self.vertices[cw(i)] == end)
    }

    /// Classifies a point relative to this triangle using the default kernel.
    ///
    /// The returned edge index refers to the vertex *opposite* to the edge. A point on
    /// the edge `(v0, v1)` yields `OnEdge(2)`, `(v1, v2)` yields `OnEdge(0)` and `(v2, v0)`
    /// yields `OnEdge(1)`.
    pub fn classify(&self, point: Point2<f64>) -> PositionInTriangle {
        self.classify_with_kernel::<TrivialKernel>(point)
    }

    pub(crate) fn classify_with_kernel<K: Kernel>(&self, point: Point2<f64>) -> PositionInTriangle {
        if let Some(index) = self.positions.iter().position(|p| p.coincides_with(point)) {
            return PositionInTriangle::OnVertex(index);
        }

        let [v0, v1, v2] = self.positions;
        // Edge (v0, v1) is opposite to v2 and so on.
        let sides = [
            (K::side_query(v0, v1, point), 2),
            (K::side_query(v1, v2, point), 0),
            (K::side_query(v2, v0, point), 1),
        ];

        // A point collinear with an edge but beyond its end points is left of another edge.
        if sides.iter().any(|(side, _)| *side == LineSide::Left) {
            return PositionInTriangle::Outside;
        }

        sides
            .iter()
            .find(|(side, _)| side.is_on_line())
            .map(|(_, opposite)| PositionInTriangle::OnEdge(*opposite))
            .unwrap_or(PositionInTriangle::Inside)
    }

    /// Returns `true` if the point's distance to the circumcenter is at most the circumradius.
    ///
    /// Points on the circumcircle are contained.
    pub fn contains_in_circumcircle(&self, point: Point2<f64>) -> bool {
        self.circumcenter.distance(point) <= self.circumradius
    }

    pub(crate) fn set_vertices(
        &mut self,
        vertices: [FixedVertexHandle; 3],
        positions: [Point2<f64>; 3],
    ) {
        self.vertices = vertices;
        self.positions = positions;
        let (circumcenter, radius_2) = math::circumcenter(positions);
        self.circumcenter = circumcenter;
        self.circumradius = radius_2.sqrt();
    }

    pub(crate) fn set_adjacent(&mut self, adjacent: [Neighbor; 3]) {
        self.adjacent = adjacent;
    }

    pub(crate) fn set_neighbor(&mut self, index: usize, neighbor: Neighbor) {
        self.adjacent[index] = neighbor;
    }

    /// Replaces the slot referring to `old`. Returns `false` if no slot refers to it.
    pub(crate) fn replace_neighbor(&mut self, old: FixedTriangleHandle, new: Neighbor) -> bool {
        match self.index_of_neighbor(old) {
            Some(index) => {
                self.adjacent[index] = new;
                true
            }
            None => false,
        }
    }
}
