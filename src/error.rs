//! Errors returned by [Triangulator::triangulate](crate::Triangulator::triangulate).

use thiserror::Error;

use crate::InvalidCoordinate;

/// Input for which no triangulation can be computed.
///
/// The input is checked before any mesh is built. A run either returns a complete triangulation or
/// one of these errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum TriangulationError {
    /// A coordinate is NaN, infinite or larger than [MAX_ALLOWED_VALUE](crate::MAX_ALLOWED_VALUE).
    #[error("invalid coordinate at input index {index}: {reason}")]
    InvalidCoordinate {
        /// Index of the offending point in the input.
        index: usize,
        /// Why the coordinate was rejected.
        reason: InvalidCoordinate,
    },

    /// Fewer than three pairwise distinct points were given.
    #[error("at least three distinct points are required, found {distinct}")]
    TooFewPoints {
        /// Number of distinct points in the input.
        distinct: usize,
    },

    /// All points lie on a single line.
    #[error("all input points are collinear")]
    AllCollinear,
}
