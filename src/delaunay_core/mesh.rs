use super::handles::{FixedTriangleHandle, FixedVertexHandle, Neighbor};
use super::triangle::{ccw, cw, Triangle};
use crate::Point2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A hull edge of a mesh, directed as it appears in its triangle.
///
/// The mesh lies on the right side of the edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundaryEdge {
    pub from: FixedVertexHandle,
    pub to: FixedVertexHandle,
    pub triangle: FixedTriangleHandle,
    /// Adjacency slot of `triangle` belonging to this edge.
    pub slot: usize,
}

/// Arena storing vertex positions and triangles.
///
/// Triangles reference each other by [FixedTriangleHandle]. Deleted triangles leave an empty
/// slot behind, handles are never reused.
#[derive(Clone, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Mesh {
    vertices: Vec<Point2<f64>>,
    triangles: Vec<Option<Triangle>>,
    num_triangles: usize,
}

impl Mesh {
    pub fn with_capacity(num_vertices: usize) -> Self {
        Mesh {
            vertices: Vec::with_capacity(num_vertices),
            // Every inserted vertex adds at most two triangles.
            triangles: Vec::with_capacity(2 * num_vertices + 1),
            num_triangles: 0,
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles that have not been deleted.
    pub fn num_triangles(&self) -> usize {
        self.num_triangles
    }

    pub fn vertices(&self) -> &[Point2<f64>] {
        &self.vertices
    }

    #[inline]
    pub fn vertex(&self, handle: FixedVertexHandle) -> Point2<f64> {
        self.vertices[handle.index()]
    }

    pub fn is_alive(&self, handle: FixedTriangleHandle) -> bool {
        matches!(self.triangles.get(handle.index()), Some(Some(_)))
    }

    #[inline]
    pub fn triangle(&self, handle: FixedTriangleHandle) -> &Triangle {
        self.triangles[handle.index()]
            .as_ref()
            .expect("Access to a deleted triangle. This is a bug.")
    }

    #[inline]
    pub(crate) fn triangle_mut(&mut self, handle: FixedTriangleHandle) -> &mut Triangle {
        self.triangles[handle.index()]
            .as_mut()
            .expect("Access to a deleted triangle. This is a bug.")
    }

    /// Iterates over the handles of all triangles that have not been deleted.
    pub fn fixed_triangles(&self) -> impl Iterator<Item = FixedTriangleHandle> + '_ {
        self.triangles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_some())
            .map(|(index, _)| FixedTriangleHandle::new(index))
    }

    /// Iterates over all triangles that have not been deleted.
    pub fn triangles(&self) -> impl Iterator<Item = &Triangle> + '_ {
        self.triangles.iter().flatten()
    }

    pub(crate) fn add_vertex(&mut self, position: Point2<f64>) -> FixedVertexHandle {
        let handle = FixedVertexHandle::new(self.vertices.len());
        self.vertices.push(position);
        handle
    }

    fn positions(&self, vertices: [FixedVertexHandle; 3]) -> [Point2<f64>; 3] {
        vertices.map(|v| self.vertex(v))
    }

    /// Returns the handle the next call to [Self::push_triangle] will return.
    pub(crate) fn next_triangle_handle(&self) -> FixedTriangleHandle {
        FixedTriangleHandle::new(self.triangles.len())
    }

    pub(crate) fn push_triangle(
        &mut self,
        vertices: [FixedVertexHandle; 3],
        adjacent: [Neighbor; 3],
    ) -> FixedTriangleHandle {
        let handle = self.next_triangle_handle();
        let mut triangle = Triangle::new(vertices, self.positions(vertices));
        triangle.set_adjacent(adjacent);
        self.triangles.push(Some(triangle));
        self.num_triangles += 1;
        handle
    }

    /// Overwrites vertices and adjacency of an existing triangle.
    pub(crate) fn update_triangle(
        &mut self,
        handle: FixedTriangleHandle,
        vertices: [FixedVertexHandle; 3],
        adjacent: [Neighbor; 3],
    ) {
        let positions = self.positions(vertices);
        let triangle = self.triangle_mut(handle);
        triangle.set_vertices(vertices, positions);
        triangle.set_adjacent(adjacent);
    }

    pub(crate) fn delete_triangle(&mut self, handle: FixedTriangleHandle) -> Triangle {
        let removed = self.triangles[handle.index()]
            .take()
            .expect("Triangle deleted twice. This is a bug.");
        self.num_triangles -= 1;
        removed
    }

    /// Makes `neighbor` refer to `new` wherever it referred to `old`.
    ///
    /// Does nothing for hull edges.
    pub(crate) fn relink(
        &mut self,
        neighbor: Neighbor,
        old: FixedTriangleHandle,
        new: FixedTriangleHandle,
    ) {
        if let Neighbor::Triangle(neighbor) = neighbor {
            let replaced = self
                .triangle_mut(neighbor)
                .replace_neighbor(old, Neighbor::Triangle(new));
            assert!(
                replaced,
                "Adjacency of {:?} is not mutual. This is a bug.",
                neighbor
            );
        }
    }

    /// Lists all edges whose adjacency slot is [Neighbor::Boundary] or [Neighbor::Detached].
    pub fn boundary_edges(&self) -> Vec<BoundaryEdge> {
        let mut result = Vec::new();
        for handle in self.fixed_triangles() {
            let triangle = self.triangle(handle);
            for slot in 0..3 {
                if triangle.neighbor(slot).triangle().is_none() {
                    result.push(BoundaryEdge {
                        from: triangle.vertex(ccw(slot)),
                        to: triangle.vertex(cw(slot)),
                        triangle: handle,
                        slot,
                    });
                }
            }
        }
        result
    }

    /// Removes deleted triangles and all vertices with an index of `num_vertices` or larger.
    ///
    /// Triangle handles are renumbered, vertex handles stay valid. No remaining triangle may
    /// reference a removed vertex.
    pub(crate) fn compact(self, num_vertices: usize) -> Mesh {
        let mut remap = Vec::with_capacity(self.triangles.len());
        let mut next = 0;
        for slot in &self.triangles {
            remap.push(slot.as_ref().map(|_| {
                next += 1;
                FixedTriangleHandle::new(next - 1)
            }));
        }

        let map_neighbor = |neighbor: Neighbor| match neighbor {
            Neighbor::Triangle(handle) => Neighbor::Triangle(
                remap[handle.index()].expect("Reference to a deleted triangle. This is a bug."),
            ),
            Neighbor::Boundary | Neighbor::Detached => Neighbor::Boundary,
        };

        let triangles: Vec<_> = self
            .triangles
            .into_iter()
            .flatten()
            .map(|mut triangle| {
                debug_assert!(triangle.vertices().iter().all(|v| v.index() < num_vertices));
                triangle.set_adjacent(triangle.adjacent().map(map_neighbor));
                Some(triangle)
            })
            .collect();

        let mut vertices = self.vertices;
        vertices.truncate(num_vertices);

        Mesh {
            vertices,
            num_triangles: triangles.len(),
            triangles,
        }
    }

    pub(crate) fn into_triangles(self) -> Vec<Triangle> {
        self.triangles.into_iter().flatten().collect()
    }

    /// Checks adjacency symmetry, shared edges and orientation of all triangles.
    #[cfg(test)]
    pub fn sanity_check(&self) {
        use super::math;

        let mut alive = 0;
        for handle in self.fixed_triangles() {
            alive += 1;
            let triangle = self.triangle(handle);
            let [v0, v1, v2] = triangle.vertices();
            assert!(v0 != v1 && v1 != v2 && v2 != v0);
            assert!(
                math::is_ordered_cw(triangle.positions()),
                "{:?} is not ordered clockwise",
                triangle
            );

            for slot in 0..3 {
                if let Neighbor::Triangle(neighbor) = triangle.neighbor(slot) {
                    assert_ne!(neighbor, handle);
                    let other = self.triangle(neighbor);
                    let back = other
                        .index_of_neighbor(handle)
                        .expect("Adjacency is not mutual");
                    // Both triangles share the edge in opposite directions.
                    let from = triangle.vertex(ccw(slot));
                    let to = triangle.vertex(cw(slot));
                    assert_eq!(other.edge_index_of(to, from), Some(back));
                }
            }
        }
        assert_eq!(alive, self.num_triangles);
    }
}

#[cfg(test)]
mod test {
    use super::Mesh;
    use crate::handles::{FixedTriangleHandle, Neighbor};
    use crate::Point2;

    fn two_triangles() -> Mesh {
        //  v1 ---- v2
        //   | t0 / |
        //   |   /  |
        //   |  / t1|
        //  v0 ---- v3
        let mut mesh = Mesh::with_capacity(4);
        let v0 = mesh.add_vertex(Point2::new(0.0, 0.0));
        let v1 = mesh.add_vertex(Point2::new(0.0, 1.0));
        let v2 = mesh.add_vertex(Point2::new(1.0, 1.0));
        let v3 = mesh.add_vertex(Point2::new(1.0, 0.0));
        let t0 = FixedTriangleHandle::new(0);
        let t1 = FixedTriangleHandle::new(1);
        mesh.push_triangle(
            [v0, v1, v2],
            [Neighbor::Boundary, Neighbor::Triangle(t1), Neighbor::Boundary],
        );
        mesh.push_triangle(
            [v0, v2, v3],
            [Neighbor::Boundary, Neighbor::Boundary, Neighbor::Triangle(t0)],
        );
        mesh
    }

    #[test]
    fn test_two_triangles() {
        let mesh = two_triangles();
        mesh.sanity_check();
        assert_eq!(mesh.num_triangles(), 2);
        assert_eq!(mesh.boundary_edges().len(), 4);
    }

    #[test]
    fn test_delete_and_compact() {
        let mut mesh = two_triangles();
        let t0 = FixedTriangleHandle::new(0);
        let t1 = FixedTriangleHandle::new(1);
        let removed = mesh.delete_triangle(t0);
        assert!(!mesh.is_alive(t0));
        assert!(mesh.is_alive(t1));
        assert!(mesh
            .triangle_mut(t1)
            .replace_neighbor(t0, Neighbor::Detached));
        assert_eq!(mesh.num_triangles(), 1);

        let compact = mesh.compact(4);
        compact.sanity_check();
        assert_eq!(compact.num_triangles(), 1);
        let remaining = compact.triangle(FixedTriangleHandle::new(0));
        assert!(remaining.adjacent().iter().all(|n| *n == Neighbor::Boundary));
        assert_ne!(remaining.vertices(), removed.vertices());
    }

    #[test]
    #[should_panic]
    fn test_access_deleted_triangle() {
        let mut mesh = two_triangles();
        mesh.delete_triangle(FixedTriangleHandle::new(1));
        mesh.triangle(FixedTriangleHandle::new(1));
    }
}
