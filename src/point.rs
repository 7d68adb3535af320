use num_traits::{Num, Signed};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::delaunay_core::math::EPSILON;

/// A coordinate type that can be fed into a triangulation.
///
/// All calculations are performed after converting the type into a `f64`.
/// This type should usually be either `f32` or `f64`.
pub trait TriNum: Num + PartialOrd + Into<f64> + From<f32> + Copy + Signed + std::fmt::Debug {}

impl<T> TriNum for T where T: Num + PartialOrd + Into<f64> + From<f32> + Copy + Signed + std::fmt::Debug
{}

/// A two dimensional point.
///
/// This is the basic type used for defining positions.
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Point2<S> {
    /// The point's x coordinate
    pub x: S,
    /// The point's y coordinate
    pub y: S,
}

impl<S> Point2<S> {
    /// Creates a new point.
    #[inline]
    pub const fn new(x: S, y: S) -> Self {
        Point2 { x, y }
    }
}

impl<S: TriNum> Point2<S> {
    /// Returns the squared distance of this point and another point.
    #[inline]
    pub fn distance_2(&self, other: Self) -> S {
        self.sub(other).length2()
    }

    /// Converts both coordinates into `f64`.
    #[inline]
    pub fn to_f64(self) -> Point2<f64> {
        Point2::new(self.x.into(), self.y.into())
    }

    pub(crate) fn add(&self, other: Self) -> Self {
        Point2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    pub(crate) fn mul(&self, factor: S) -> Self {
        Point2 {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    pub(crate) fn length2(&self) -> S {
        self.x * self.x + self.y * self.y
    }

    pub(crate) fn sub(&self, other: Self) -> Self {
        Point2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    pub(crate) fn dot(&self, other: Self) -> S {
        self.x * other.x + self.y * other.y
    }
}

impl Point2<f64> {
    /// Returns the euclidean distance between this point and another point.
    #[inline]
    pub fn distance(&self, other: Self) -> f64 {
        self.distance_2(other).sqrt()
    }

    /// Returns `true` if both points coincide.
    ///
    /// Two points coincide if the sum of their absolute coordinate differences is smaller
    /// than [EPSILON](crate::EPSILON). As that constant is the smallest positive `f64`, this
    /// is an exact comparison in all practical cases - except that `-0.0` and `0.0` coincide.
    #[inline]
    pub fn coincides_with(&self, other: Self) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() < EPSILON
    }
}

impl<S: TriNum> From<Point2<S>> for [S; 2] {
    #[inline]
    fn from(point: Point2<S>) -> Self {
        [point.x, point.y]
    }
}

impl<S: TriNum> From<Point2<S>> for (S, S) {
    #[inline]
    fn from(point: Point2<S>) -> (S, S) {
        (point.x, point.y)
    }
}

impl<S: TriNum> From<[S; 2]> for Point2<S> {
    #[inline]
    fn from(source: [S; 2]) -> Self {
        Self::new(source[0], source[1])
    }
}

impl<S: TriNum> From<(S, S)> for Point2<S> {
    #[inline]
    fn from(source: (S, S)) -> Self {
        Self::new(source.0, source.1)
    }
}

/// An object with position.
///
/// Anything implementing this trait can be passed to
/// [Triangulator::triangulate](crate::Triangulator::triangulate).
pub trait HasPosition {
    /// The number type used by this coordinate type.
    type Scalar: TriNum;

    /// Returns the position of this object.
    fn position(&self) -> Point2<Self::Scalar>;
}

impl<S: TriNum> HasPosition for Point2<S> {
    type Scalar = S;

    fn position(&self) -> Point2<S> {
        *self
    }
}
