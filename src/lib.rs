//! # flipmesh
//!
//! Incremental 2D Delaunay triangulation of point sets.
//!
//! Points are inserted one at a time into a *super triangle* that encloses the whole input. After
//! each insertion, edges violating the Delaunay property are flipped until every triangle has an
//! empty circumcircle. Finally, the super triangle's corners are removed and the hull of the
//! remaining mesh is repaired so that the result covers exactly the convex hull of the input.
//!
//! # Features
//! * Floating point input of type `f32` or `f64`, see [HasPosition]
//! * Pluggable orientation predicates, see [Kernel]. Flip decisions always use an exact in-circle
//!   test, which guarantees termination even for cocircular points.
//! * Pluggable point location, see [PointLocator]
//! * Duplicate points are skipped and counted, see [TriangulationStatistics]
//! * Serialization with `serde` (enable the `serde` feature)
//!
//! # Example
//! ```
//! use flipmesh::{triangulate, Point2, TriangulationError};
//!
//! # fn main() -> Result<(), TriangulationError> {
//! let points = [
//!     Point2::new(0.0, 0.0),
//!     Point2::new(4.0, 0.0),
//!     Point2::new(4.0, 3.0),
//!     Point2::new(0.0, 3.0),
//!     Point2::new(1.0, 1.0),
//! ];
//! let triangulation = triangulate(&points)?;
//! for triangle in triangulation.triangles() {
//!     let [a, b, c] = triangle.vertices();
//!     println!("{} {} {}", a.index(), b.index(), c.index());
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]

mod delaunay_core;
mod error;
mod kernels;
mod point;
mod triangulation;
mod triangulator;

pub use crate::delaunay_core::{
    BoundaryEdge, LastUsedTriangleLocator, LineSide, LinearScanLocator, Mesh, PointLocator,
    PolarAngleOrder, PositionInTriangle, PositionInTriangulation, Triangle,
};
pub use crate::delaunay_core::math::{
    validate_coordinate, validate_vertex, InvalidCoordinate, EPSILON, MAX_ALLOWED_VALUE,
};
pub use crate::error::TriangulationError;
pub use crate::kernels::{FloatKernel, Kernel, TrivialKernel};
pub use crate::point::{HasPosition, Point2, TriNum};
pub use crate::triangulation::{Triangulation, TriangulationStatistics};
pub use crate::triangulator::{triangulate, Triangulator, SUPER_TRIANGLE_MARGIN};

/// Handle types used to reference vertices and triangles of a [Mesh].
pub mod handles {
    pub use crate::delaunay_core::handles::*;
}

/// Geometric predicates and helpers.
pub mod math {
    pub use crate::delaunay_core::math::{
        circumcenter, contained_in_circumference, is_ordered_cw, side_query, side_query_exact,
        triangle_area,
    };
}

#[cfg(test)]
mod test_utilities;
