use super::handles::{FixedTriangleHandle, FixedVertexHandle};
use super::mesh::Mesh;
use super::triangle::{ccw, cw, PositionInTriangle};
use crate::{Kernel, Point2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Describes the position of a point relative to a whole triangle mesh.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum PositionInTriangulation {
    /// The point coincides with a vertex.
    OnVertex(FixedVertexHandle),
    /// The point lies on the edge opposite to the vertex with the given index of the triangle.
    OnEdge(FixedTriangleHandle, usize),
    /// The point lies strictly inside a triangle.
    InTriangle(FixedTriangleHandle),
    /// No triangle contains the point.
    OutsideOfConvexHull,
}

impl PositionInTriangulation {
    fn from_triangle(
        handle: FixedTriangleHandle,
        mesh: &Mesh,
        position: PositionInTriangle,
    ) -> Option<Self> {
        match position {
            PositionInTriangle::OnVertex(index) => Some(PositionInTriangulation::OnVertex(
                mesh.triangle(handle).vertex(index),
            )),
            PositionInTriangle::OnEdge(index) => {
                Some(PositionInTriangulation::OnEdge(handle, index))
            }
            PositionInTriangle::Inside => Some(PositionInTriangulation::InTriangle(handle)),
            PositionInTriangle::Outside => None,
        }
    }
}

/// Finds the triangle containing a point.
///
/// Each triangulation run creates its own locator with [Default::default], no state is shared
/// between runs.
///
/// Two locators are available:
///  - A plain scan over all triangles, in insertion order ([LinearScanLocator])
///  - A walk that starts at the last located triangle ([LastUsedTriangleLocator])
pub trait PointLocator: Default {
    fn locate<K: Kernel>(&mut self, mesh: &Mesh, point: Point2<f64>) -> PositionInTriangulation;
}

/// Tests every triangle in storage order and returns the first one that does not classify the
/// point as outside.
///
/// Takes `O(n)` per query. This is the default locator.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct LinearScanLocator;

impl PointLocator for LinearScanLocator {
    fn locate<K: Kernel>(&mut self, mesh: &Mesh, point: Point2<f64>) -> PositionInTriangulation {
        mesh.fixed_triangles()
            .find_map(|handle| {
                let position = mesh.triangle(handle).classify_with_kernel::<K>(point);
                PositionInTriangulation::from_triangle(handle, mesh, position)
            })
            .unwrap_or(PositionInTriangulation::OutsideOfConvexHull)
    }
}

/// Walks towards the point, starting at the triangle that was located last.
///
/// Every step crosses an edge that separates the current triangle from the point. This is fast
/// if consecutive queries are spatially close, e.g. for sorted input. Walks that leave the mesh or
/// take too long fall back to a linear scan.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct LastUsedTriangleLocator {
    last: Option<FixedTriangleHandle>,
}

impl LastUsedTriangleLocator {
    fn walk<K: Kernel>(
        &self,
        mesh: &Mesh,
        point: Point2<f64>,
    ) -> Option<PositionInTriangulation> {
        let mut current = self
            .last
            .filter(|handle| mesh.is_alive(*handle))
            .or_else(|| mesh.fixed_triangles().next())?;

        for _ in 0..mesh.num_triangles() {
            let triangle = mesh.triangle(current);
            let position = triangle.classify_with_kernel::<K>(point);
            if let Some(result) = PositionInTriangulation::from_triangle(current, mesh, position) {
                return Some(result);
            }

            let edge = (0..3).find(|&i| {
                let from = triangle.position(ccw(i));
                let to = triangle.position(cw(i));
                K::side_query(from, to, point).is_on_left_side()
            })?;
            current = triangle.neighbor(edge).triangle()?;
        }
        None
    }
}

impl PointLocator for LastUsedTriangleLocator {
    fn locate<K: Kernel>(&mut self, mesh: &Mesh, point: Point2<f64>) -> PositionInTriangulation {
        let result = self
            .walk::<K>(mesh, point)
            .unwrap_or_else(|| LinearScanLocator.locate::<K>(mesh, point));

        match result {
            PositionInTriangulation::OnEdge(handle, _)
            | PositionInTriangulation::InTriangle(handle) => self.last = Some(handle),
            _ => {}
        }
        result
    }
}
