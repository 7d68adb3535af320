use crate::delaunay_core::{
    hull_repair, LinearScanLocator, Mesh, PointLocator, PositionInTriangulation,
};
use crate::handles::{FixedTriangleHandle, FixedVertexHandle, Neighbor};
use crate::{Kernel, Point2, Triangle, TrivialKernel};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Counters collected while a triangulation was built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct TriangulationStatistics {
    /// Number of input points that became a vertex.
    pub inserted: usize,
    /// Number of input points dropped because they coincide with an earlier point.
    pub duplicates: usize,
    /// Number of edge flips performed to restore the Delaunay property.
    pub flips: usize,
    /// Number of triangles created while the super triangle was removed.
    pub hull_triangles_filled: usize,
}

/// The result of [Triangulator::triangulate](crate::Triangulator::triangulate).
///
/// An immutable set of clockwise oriented triangles covering the convex hull of the input points.
/// No input point lies strictly inside the circumcircle of any triangle.
///
/// Vertex handles are indices into the input. Points that were dropped as duplicates keep their
/// index but are not referenced by any triangle.
///
/// # Example
/// ```
/// use flipmesh::{triangulate, Point2};
///
/// # fn main() -> Result<(), flipmesh::TriangulationError> {
/// let points = [
///     Point2::new(0.0, 0.0),
///     Point2::new(10.0, 0.0),
///     Point2::new(10.0, 10.0),
///     Point2::new(0.0, 10.0),
///     Point2::new(5.0, 5.0),
/// ];
/// let triangulation = triangulate(&points)?;
/// assert_eq!(triangulation.num_triangles(), 4);
/// assert_eq!(triangulation.convex_hull().len(), 4);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Triangulation {
    mesh: Mesh,
    statistics: TriangulationStatistics,
}

impl Triangulation {
    pub(crate) fn new(mesh: Mesh, statistics: TriangulationStatistics) -> Self {
        Triangulation { mesh, statistics }
    }

    /// Returns the number of input points, including dropped duplicates.
    pub fn num_vertices(&self) -> usize {
        self.mesh.num_vertices()
    }

    pub fn num_triangles(&self) -> usize {
        self.mesh.num_triangles()
    }

    /// Returns the position of an input point.
    pub fn vertex(&self, handle: FixedVertexHandle) -> Point2<f64> {
        self.mesh.vertex(handle)
    }

    /// Returns all input positions, converted to `f64`.
    pub fn vertices(&self) -> &[Point2<f64>] {
        self.mesh.vertices()
    }

    pub fn triangle(&self, handle: FixedTriangleHandle) -> &Triangle {
        self.mesh.triangle(handle)
    }

    /// An iterator visiting all triangles.
    pub fn triangles(&self) -> impl Iterator<Item = &Triangle> + '_ {
        self.mesh.triangles()
    }

    /// An iterator visiting the handles of all triangles. Handles are numbered `0..num_triangles()`.
    pub fn fixed_triangles(&self) -> impl Iterator<Item = FixedTriangleHandle> + '_ {
        self.mesh.fixed_triangles()
    }

    /// Grants access to the underlying mesh, e.g. for custom [PointLocator] implementations.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn statistics(&self) -> TriangulationStatistics {
        self.statistics
    }

    /// Locates a point by testing every triangle with the default kernel.
    ///
    /// # Example
    /// ```
    /// use flipmesh::{triangulate, Point2, PositionInTriangulation};
    ///
    /// # fn main() -> Result<(), flipmesh::TriangulationError> {
    /// let points = [Point2::new(0.0, 0.0), Point2::new(0.0, 4.0), Point2::new(4.0, 0.0)];
    /// let triangulation = triangulate(&points)?;
    /// assert!(matches!(
    ///     triangulation.locate(Point2::new(1.0, 1.0)),
    ///     PositionInTriangulation::InTriangle(_)
    /// ));
    /// assert_eq!(
    ///     triangulation.locate(Point2::new(5.0, 5.0)),
    ///     PositionInTriangulation::OutsideOfConvexHull
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn locate(&self, point: Point2<f64>) -> PositionInTriangulation {
        self.locate_with::<TrivialKernel, _>(&mut LinearScanLocator, point)
    }

    /// Locates a point with a custom kernel and locator.
    pub fn locate_with<K: Kernel, L: PointLocator>(
        &self,
        locator: &mut L,
        point: Point2<f64>,
    ) -> PositionInTriangulation {
        locator.locate::<K>(&self.mesh, point)
    }

    /// Returns the vertices of the convex hull in clockwise order.
    ///
    /// Input points lying on a hull edge are part of the result.
    pub fn convex_hull(&self) -> Vec<FixedVertexHandle> {
        hull_repair::boundary_loops(&self.mesh)
            .into_iter()
            .next()
            .map(|hull| hull.iter().map(|edge| edge.from).collect())
            .unwrap_or_default()
    }

    /// Returns every edge of the triangulation exactly once.
    pub fn undirected_edges(&self) -> Vec<[FixedVertexHandle; 2]> {
        let mut result = Vec::new();
        for handle in self.mesh.fixed_triangles() {
            let triangle = self.mesh.triangle(handle);
            for slot in 0..3 {
                let include = match triangle.neighbor(slot) {
                    Neighbor::Triangle(neighbor) => neighbor > handle,
                    Neighbor::Boundary | Neighbor::Detached => true,
                };
                if include {
                    result.push([
                        triangle.vertex((slot + 1) % 3),
                        triangle.vertex((slot + 2) % 3),
                    ]);
                }
            }
        }
        result
    }

    /// Consumes the triangulation and returns its triangles.
    pub fn into_triangles(self) -> Vec<Triangle> {
        self.mesh.into_triangles()
    }

    /// Checks mesh consistency and the Delaunay property by brute force.
    #[cfg(test)]
    pub fn sanity_check(&self) {
        use crate::delaunay_core::math;

        self.mesh.sanity_check();
        for triangle in self.triangles() {
            assert!(triangle
                .adjacent()
                .iter()
                .all(|neighbor| *neighbor != Neighbor::Detached));

            let [v0, v1, v2] = triangle.positions();
            for (index, position) in self.vertices().iter().enumerate() {
                if triangle.contains_vertex(FixedVertexHandle::new(index)) {
                    continue;
                }
                assert!(
                    !math::contained_in_circumference(v0, v1, v2, *position),
                    "Vertex {} violates the circumcircle of {:?}",
                    index,
                    triangle
                );
            }
        }
    }
}
