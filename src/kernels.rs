use crate::delaunay_core::math;
use crate::{LineSide, Point2};

/// Determines how a triangulator performs its basic geometry computations.
///
/// Every triangulation is based on two basic geometry operations: orientation tests
/// (on which side of a line lies a point?) and in-circle tests (is a point contained in the
/// circumference of a triangle?). The orientation test decides point location, edge splits and
/// hull repair, the in-circle test decides whether an edge is flipped.
///
/// The in-circle test is always answered exactly: an inexact flip decision can make the flip
/// repair alternate between the two diagonals of four (almost) cocircular points forever.
pub trait Kernel {
    /// Returns on which side of the directed line `from -> to` the query point lies.
    fn side_query(from: Point2<f64>, to: Point2<f64>, query_point: Point2<f64>) -> LineSide;

    /// Returns `true` if `p` lies strictly inside the circumcircle of the clockwise ordered
    /// triangle `v0, v1, v2`.
    fn contained_in_circumference(
        v0: Point2<f64>,
        v1: Point2<f64>,
        v2: Point2<f64>,
        p: Point2<f64>,
    ) -> bool {
        math::contained_in_circumference(v0, v1, v2, p)
    }
}

/// Plain `f64` orientation test with the [EPSILON](crate::EPSILON) tolerance.
///
/// Offers best performance. Since the tolerance is the smallest positive `f64`, this kernel
/// essentially trusts the sign of a rounded cross product. Points very close to an edge can be
/// classified on the wrong side, which may produce inverted triangles for adversarial input.
/// This is the default kernel.
#[derive(Clone, Copy, Debug, Default)]
pub struct TrivialKernel;

impl Kernel for TrivialKernel {
    #[inline]
    fn side_query(from: Point2<f64>, to: Point2<f64>, query_point: Point2<f64>) -> LineSide {
        math::side_query(from, to, query_point)
    }
}

/// Exact, adaptive precision orientation test.
///
/// Uses Shewchuk's adaptive `orient2d`: if a calculation is inaccurate, its precision is increased
/// until the sign is certain. Since most calculations are accurate enough in their simplest form,
/// usually only the overhead of checking the precision is encountered.
#[derive(Clone, Copy, Debug, Default)]
pub struct FloatKernel;

impl Kernel for FloatKernel {
    #[inline]
    fn side_query(from: Point2<f64>, to: Point2<f64>, query_point: Point2<f64>) -> LineSide {
        math::side_query_exact(from, to, query_point)
    }
}
