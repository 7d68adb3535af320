use std::marker::PhantomData;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::delaunay_core::{
    hull_repair, math, mesh_operations, LinearScanLocator, Mesh, PointLocator,
    PositionInTriangulation, RepairQueue,
};
use crate::handles::{FixedVertexHandle, Neighbor};
use crate::{
    FloatKernel, HasPosition, Kernel, Point2, Triangulation, TriangulationError,
    TriangulationStatistics, TrivialKernel,
};

/// Size of the super triangle relative to the larger side of the input's bounding box.
pub const SUPER_TRIANGLE_MARGIN: f64 = 1.5;

/// Builds Delaunay triangulations by incremental insertion.
///
/// All input points are first enclosed by a large *super triangle*. Points are then inserted
/// one after another in input order: the triangle or edge containing the point is split and
/// the Delaunay property is restored by flipping edges. Finally, the three corners of the super
/// triangle are removed together with all triangles touching them and the resulting hull is
/// repaired.
///
/// The type parameters select the orientation predicates (see [Kernel]) and the point location
/// strategy (see [PointLocator]). Use [triangulate] for the default configuration.
///
/// A triangulator holds no mesh state. Every call to [Self::triangulate] starts from scratch,
/// which allows sharing a triangulator between threads.
///
/// # Example
/// ```
/// use flipmesh::{FloatKernel, LastUsedTriangleLocator, Point2, Triangulator};
///
/// # fn main() -> Result<(), flipmesh::TriangulationError> {
/// let triangulator = Triangulator::<FloatKernel, LastUsedTriangleLocator>::with_capacity(4);
/// let triangulation = triangulator.triangulate(&[
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 1.0),
/// ])?;
/// assert_eq!(triangulation.num_triangles(), 2);
/// # Ok(())
/// # }
/// ```
pub struct Triangulator<K = TrivialKernel, L = LinearScanLocator> {
    capacity: usize,
    // fn() -> _ keeps the triangulator Send and Sync for any kernel and locator.
    _configuration: PhantomData<fn() -> (K, L)>,
}

impl<K, L> std::fmt::Debug for Triangulator<K, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Triangulator")
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<K, L> Clone for Triangulator<K, L> {
    fn clone(&self) -> Self {
        Self::with_capacity(self.capacity)
    }
}

impl<K, L> Default for Triangulator<K, L> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<K, L> Triangulator<K, L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a triangulator that reserves space for `capacity` points up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Triangulator {
            capacity,
            _configuration: PhantomData,
        }
    }
}

impl<K: Kernel, L: PointLocator> Triangulator<K, L> {
    /// Triangulates a point set.
    ///
    /// Points coinciding with an earlier point are skipped. Returns an error if a coordinate is
    /// invalid (see [validate_coordinate](crate::validate_coordinate)), if there are fewer than
    /// three distinct points or if all points are collinear.
    pub fn triangulate<V: HasPosition>(
        &self,
        vertices: &[V],
    ) -> Result<Triangulation, TriangulationError> {
        let positions = vertices
            .iter()
            .enumerate()
            .map(|(index, vertex)| {
                math::validate_vertex(vertex)
                    .map_err(|reason| TriangulationError::InvalidCoordinate { index, reason })?;
                Ok(vertex.position().to_f64())
            })
            .collect::<Result<Vec<_>, _>>()?;

        check_input::<K>(&positions)?;

        let mut mesh = Mesh::with_capacity(self.capacity.max(positions.len()) + 3);
        for position in &positions {
            mesh.add_vertex(*position);
        }
        let corners = super_triangle(&positions).map(|corner| mesh.add_vertex(corner));
        mesh.push_triangle(corners, [Neighbor::Boundary; 3]);

        let mut builder = Builder::<K, L> {
            mesh,
            queue: RepairQueue::new(),
            locator: L::default(),
            statistics: TriangulationStatistics::default(),
            kernel: PhantomData,
        };

        for index in 0..positions.len() {
            builder.insert(FixedVertexHandle::new(index));
        }
        builder.remove_super_triangle(corners);

        let Builder {
            mesh, statistics, ..
        } = builder;
        let mesh = mesh.compact(positions.len());
        debug!(
            points = positions.len(),
            inserted = statistics.inserted,
            duplicates = statistics.duplicates,
            flips = statistics.flips,
            hull_triangles_filled = statistics.hull_triangles_filled,
            triangles = mesh.num_triangles(),
            "triangulated"
        );
        Ok(Triangulation::new(mesh, statistics))
    }
}

/// Triangulates a point set with the default [Triangulator].
///
/// # Example
/// ```
/// use flipmesh::{triangulate, Point2, TriangulationError};
///
/// let collinear = [Point2::new(0.0, 0.0), Point2::new(5.0, 0.0), Point2::new(10.0, 0.0)];
/// assert_eq!(triangulate(&collinear).unwrap_err(), TriangulationError::AllCollinear);
/// ```
pub fn triangulate<V: HasPosition>(vertices: &[V]) -> Result<Triangulation, TriangulationError> {
    Triangulator::<TrivialKernel, LinearScanLocator>::new().triangulate(vertices)
}

/// Rejects inputs without three distinct, non collinear points.
fn check_input<K: Kernel>(positions: &[Point2<f64>]) -> Result<(), TriangulationError> {
    let mut distinct: SmallVec<[Point2<f64>; 2]> = SmallVec::new();
    let mut collinear = false;
    for position in positions {
        if distinct.iter().any(|p| p.coincides_with(*position)) {
            continue;
        }
        if distinct.len() < 2 {
            distinct.push(*position);
        } else if K::side_query(distinct[0], distinct[1], *position).is_on_line() {
            collinear = true;
        } else {
            return Ok(());
        }
    }

    if collinear {
        Err(TriangulationError::AllCollinear)
    } else {
        Err(TriangulationError::TooFewPoints {
            distinct: distinct.len(),
        })
    }
}

/// Returns the clockwise corners of a triangle strictly enclosing all positions.
pub(crate) fn super_triangle(positions: &[Point2<f64>]) -> [Point2<f64>; 3] {
    let mut min = positions[0];
    let mut max = positions[0];
    for position in positions {
        min = Point2::new(min.x.min(position.x), min.y.min(position.y));
        max = Point2::new(max.x.max(position.x), max.y.max(position.y));
    }

    let mut size = (max.x - min.x).max(max.y - min.y);
    if size <= 0.0 {
        size = 1.0;
    }
    let m = SUPER_TRIANGLE_MARGIN * size;
    let center = Point2::new((min.x + max.x) * 0.5, (min.y + max.y) * 0.5);

    [
        Point2::new(center.x - 2.0 * m, center.y - m),
        Point2::new(center.x, center.y + 2.0 * m),
        Point2::new(center.x + 2.0 * m, center.y - m),
    ]
}

/// State of a single triangulation run.
struct Builder<K, L> {
    mesh: Mesh,
    queue: RepairQueue,
    locator: L,
    statistics: TriangulationStatistics,
    kernel: PhantomData<K>,
}

impl<K: Kernel, L: PointLocator> Builder<K, L> {
    fn insert(&mut self, vertex: FixedVertexHandle) {
        let position = self.mesh.vertex(vertex);
        let location = match self.locator.locate::<K>(&self.mesh, position) {
            // An inexact kernel may place a point next to an edge outside of both triangles.
            PositionInTriangulation::OutsideOfConvexHull => {
                LinearScanLocator.locate::<FloatKernel>(&self.mesh, position)
            }
            location => location,
        };

        let affected = match location {
            PositionInTriangulation::OnVertex(existing) => {
                self.statistics.duplicates += 1;
                trace!(
                    vertex = vertex.index(),
                    existing = existing.index(),
                    "dropped duplicate"
                );
                return;
            }
            PositionInTriangulation::InTriangle(triangle) => {
                trace!(
                    vertex = vertex.index(),
                    triangle = triangle.index(),
                    "split triangle"
                );
                mesh_operations::insert_into_triangle(&mut self.mesh, vertex, triangle)
            }
            PositionInTriangulation::OnEdge(triangle, edge) => {
                trace!(
                    vertex = vertex.index(),
                    triangle = triangle.index(),
                    edge,
                    "split edge"
                );
                mesh_operations::split_edge(&mut self.mesh, vertex, triangle, edge)
            }
            PositionInTriangulation::OutsideOfConvexHull => panic!(
                "Vertex {} lies outside of the super triangle. This is a bug.",
                vertex.index()
            ),
        };

        self.statistics.inserted += 1;
        self.queue.extend(affected);
        self.restore_delaunay_property();
    }

    /// Drains the repair queue, flipping every edge whose opposite vertex lies inside the
    /// circumcircle of a queued triangle.
    fn restore_delaunay_property(&mut self) {
        while let Some(handle) = self.queue.pop() {
            if !self.mesh.is_alive(handle) {
                continue;
            }

            let triangle = self.mesh.triangle(handle);
            let [v0, v1, v2] = triangle.positions();
            let candidate = triangle.neighbors().find(|neighbor| {
                let opposite = self
                    .mesh
                    .triangle(*neighbor)
                    .opposite_vertex_of(handle)
                    .expect("Adjacency is not mutual. This is a bug.");
                K::contained_in_circumference(v0, v1, v2, self.mesh.vertex(opposite))
            });

            if let Some(neighbor) = candidate {
                let affected = mesh_operations::flip(&mut self.mesh, handle, neighbor)
                    .expect("Cannot flip non adjacent triangles. This is a bug.");
                debug_assert!(math::is_ordered_cw(self.mesh.triangle(handle).positions()));
                debug_assert!(math::is_ordered_cw(self.mesh.triangle(neighbor).positions()));
                self.statistics.flips += 1;
                trace!(
                    triangle = handle.index(),
                    neighbor = neighbor.index(),
                    "flipped edge"
                );
                self.queue.extend(affected);
            }
        }
    }

    fn remove_super_triangle(&mut self, corners: [FixedVertexHandle; 3]) {
        for corner in corners {
            let removal =
                hull_repair::remove_super_vertex::<K>(&mut self.mesh, corner, &mut self.queue);
            self.statistics.hull_triangles_filled += removal.filled;
        }
        self.statistics.hull_triangles_filled +=
            hull_repair::seal_hull::<K>(&mut self.mesh, &mut self.queue);
        self.restore_delaunay_property();
    }
}
