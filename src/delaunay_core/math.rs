use crate::{HasPosition, LineSide, Point2, TriNum};

/// Tolerance of the default side test and of [Point2::coincides_with].
///
/// This is the smallest positive representable `f64` (a subnormal number, `2^-1074`), which
/// makes the tolerance an exact comparison in all but a few subnormal cases. Use
/// [FloatKernel](crate::FloatKernel) if near-degenerate input must be classified exactly.
pub const EPSILON: f64 = 5e-324;

/// The largest allowed absolute coordinate value. This value is equal to 2<sup>201</sup>.
///
/// Larger values would overflow the exact predicates used by the flip decision.
///
/// *See also [validate_coordinate], [validate_vertex]*
pub const MAX_ALLOWED_VALUE: f64 = 3.2138760885179806e60; // 1.0 * 2^201

/// Reasons for which a coordinate cannot be triangulated.
#[derive(Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Debug, Hash)]
pub enum InvalidCoordinate {
    /// A coordinate value was larger than [MAX_ALLOWED_VALUE] or infinite.
    TooLarge,
    /// A coordinate value was NaN.
    NAN,
}

impl std::fmt::Display for InvalidCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Debug>::fmt(self, f)
    }
}

/// Checks if a coordinate value is suitable for triangulation.
///
/// Passing in any non-finite floating point number (e.g. `f32::NEG_INFINITY`) will
/// result in `Err(InvalidCoordinate::TooLarge)`.
pub fn validate_coordinate<S: TriNum>(value: S) -> Result<(), InvalidCoordinate> {
    let as_f64: f64 = value.into();
    if as_f64.is_nan() {
        Err(InvalidCoordinate::NAN)
    } else if as_f64.abs() > MAX_ALLOWED_VALUE {
        Err(InvalidCoordinate::TooLarge)
    } else {
        Ok(())
    }
}

/// Checks if all coordinates of a vertex are valid. See [validate_coordinate].
pub fn validate_vertex<V: HasPosition>(vertex: &V) -> Result<(), InvalidCoordinate> {
    let position = vertex.position();
    validate_coordinate(position.x)?;
    validate_coordinate(position.y)?;
    Ok(())
}

/// Returns on which side of the directed line `from -> to` the query point lies.
///
/// This is the sign of the cross product of `to - from` and `query_point - from`. Magnitudes
/// below [EPSILON] are reported as [LineSide::Center].
pub fn side_query(from: Point2<f64>, to: Point2<f64>, query_point: Point2<f64>) -> LineSide {
    let q = query_point;
    let determinant = (to.x - from.x) * (q.y - from.y) - (to.y - from.y) * (q.x - from.x);
    LineSide::from_determinant(determinant)
}

fn to_robust_coord(point: Point2<f64>) -> robust::Coord<f64> {
    robust::Coord {
        x: point.x,
        y: point.y,
    }
}

/// Exact variant of [side_query].
pub fn side_query_exact(
    from: Point2<f64>,
    to: Point2<f64>,
    query_point: Point2<f64>,
) -> LineSide {
    let result = robust::orient2d(
        to_robust_coord(from),
        to_robust_coord(to),
        to_robust_coord(query_point),
    );
    LineSide::from_determinant(result)
}

/// Returns `true` if `p` lies strictly inside the circumcircle of the clockwise ordered
/// triangle `v0, v1, v2`. Points on the circle are not contained.
pub fn contained_in_circumference(
    v0: Point2<f64>,
    v1: Point2<f64>,
    v2: Point2<f64>,
    p: Point2<f64>,
) -> bool {
    // incircle is positive for counterclockwise triangles with p inside.
    robust::incircle(
        to_robust_coord(v2),
        to_robust_coord(v1),
        to_robust_coord(v0),
        to_robust_coord(p),
    ) > 0.0
}

/// Returns the circumcenter and the squared circumradius of a triangle.
///
/// The result is not finite for degenerate triangles.
pub fn circumcenter(positions: [Point2<f64>; 3]) -> (Point2<f64>, f64) {
    let [v0, v1, v2] = positions;
    let b = v1.sub(v0);
    let c = v2.sub(v0);

    let d = 2.0 * (b.x * c.y - c.x * b.y);
    let len_b = b.dot(b);
    let len_c = c.dot(c);
    let d_inv = 1.0 / d;

    let x = (len_b * c.y - len_c * b.y) * d_inv;
    let y = (-len_b * c.x + len_c * b.x) * d_inv;
    let result = Point2::new(x, y);
    (result.add(v0), x * x + y * y)
}

pub fn triangle_area(positions: [Point2<f64>; 3]) -> f64 {
    let [v0, v1, v2] = positions;
    let b = v1.sub(v0);
    let c = v2.sub(v0);
    (b.x * c.y - b.y * c.x).abs() * 0.5
}

/// Returns `true` if the triangle is ordered clockwise according to [side_query_exact].
///
/// Slivers that the epsilon test reports as degenerate are still recognized.
pub fn is_ordered_cw(positions: [Point2<f64>; 3]) -> bool {
    side_query_exact(positions[0], positions[1], positions[2]).is_on_right_side()
}

#[cfg(test)]
mod test {
    use super::{validate_coordinate, InvalidCoordinate};
    use crate::{LineSide, Point2};
    use approx::assert_relative_eq;

    #[test]
    fn test_validate_coordinate() {
        use InvalidCoordinate::*;
        assert_eq!(validate_coordinate(f64::NAN), Err(NAN));
        let max_value = super::MAX_ALLOWED_VALUE;

        assert_eq!(validate_coordinate(f64::INFINITY), Err(TooLarge));
        assert_eq!(validate_coordinate(f64::NEG_INFINITY), Err(TooLarge));
        assert_eq!(validate_coordinate(max_value * 2.0), Err(TooLarge));

        assert_eq!(validate_coordinate(f32::MAX), Ok(()));
        assert_eq!(validate_coordinate(f32::MIN_POSITIVE), Ok(()));
        assert_eq!(validate_coordinate(0.0), Ok(()));
        assert_eq!(validate_coordinate(max_value), Ok(()));
    }

    #[test]
    fn check_max_value() {
        let mut expected = 1.0f64;
        for _ in 0..201 {
            expected *= 2.0;
        }

        assert_eq!(super::MAX_ALLOWED_VALUE, expected);
    }

    #[test]
    fn check_epsilon() {
        assert_eq!(super::EPSILON, f64::from_bits(1));
        assert!(super::EPSILON > 0.0);
        assert_eq!(super::EPSILON / 2.0, 0.0);
    }

    #[test]
    fn test_edge_side() {
        use super::side_query;

        let p1 = Point2::new(0.0, 0.0);
        let p2 = Point2::new(1.0, 1.0);

        assert_eq!(side_query(p1, p2, Point2::new(1.0, 0.0)), LineSide::Right);
        assert_eq!(side_query(p1, p2, Point2::new(0.0, 1.0)), LineSide::Left);
        assert_eq!(side_query(p1, p2, Point2::new(0.5, 0.5)), LineSide::Center);
        assert_eq!(side_query(p1, p2, Point2::new(3.0, 3.0)), LineSide::Center);
    }

    #[test]
    fn test_side_query_near_line() {
        use super::{side_query, side_query_exact};
        use float_next_after::NextAfter;

        let from = Point2::new(0.0, 0.0);
        let to = Point2::new(10.0, 0.0);
        let above = Point2::new(5.0, 0.0.next_after(f64::INFINITY));
        assert_eq!(side_query_exact(from, to, above), LineSide::Left);
        assert_eq!(side_query(from, to, above), LineSide::Left);
        assert_eq!(
            side_query_exact(from, to, Point2::new(5.0, 0.0)),
            LineSide::Center
        );
    }

    #[test]
    fn test_is_ordered_cw_sliver() {
        use super::{is_ordered_cw, side_query};

        // The rounded cross product cancels to zero, the exact one is negative.
        let v0 = Point2::new(0.0, 0.0);
        let v1 = Point2::new(1.0, 1.0 - f64::EPSILON / 2.0);
        let v2 = Point2::new(1.0 + f64::EPSILON, 1.0);
        assert_eq!(side_query(v0, v1, v2), LineSide::Center);
        assert!(is_ordered_cw([v0, v1, v2]));
        assert!(!is_ordered_cw([v0, v2, v1]));
    }

    #[test]
    fn test_triangle_area() {
        use super::triangle_area;
        let t = [
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 2.0),
            Point2::new(3.0, 0.0),
        ];
        assert_relative_eq!(triangle_area(t), 3.0);
        assert_eq!(
            triangle_area([Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(2.0, 0.0)]),
            0.0
        );
    }

    #[test]
    fn test_circumcenter() {
        use super::circumcenter;
        let (center, radius_2) = circumcenter([
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 2.0),
            Point2::new(2.0, 0.0),
        ]);
        assert_relative_eq!(center.x, 1.0);
        assert_relative_eq!(center.y, 1.0);
        assert_relative_eq!(radius_2, 2.0);
    }

    #[test]
    fn test_contained_in_circumference() {
        use super::{contained_in_circumference, is_ordered_cw};

        let (a1, a2, a3) = (1f64, 2f64, 3f64);
        let offset = Point2::new(0.5, 0.7);
        let v1 = Point2::new(a1.sin(), a1.cos()).mul(2.).add(offset);
        let v2 = Point2::new(a2.sin(), a2.cos()).mul(2.).add(offset);
        let v3 = Point2::new(a3.sin(), a3.cos()).mul(2.).add(offset);
        assert!(is_ordered_cw([v1, v2, v3]));
        assert!(contained_in_circumference(v1, v2, v3, offset));
        let shrunk = (v1.sub(offset)).mul(0.9).add(offset);
        assert!(contained_in_circumference(v1, v2, v3, shrunk));
        let expanded = (v1.sub(offset)).mul(1.1).add(offset);
        assert!(!contained_in_circumference(v1, v2, v3, expanded));
        assert!(!contained_in_circumference(
            v1,
            v2,
            v3,
            Point2::new(2.0 + offset.x, 2.0 + offset.y)
        ));
    }

    #[test]
    fn test_cocircular_point_is_not_contained() {
        use super::contained_in_circumference;
        // Clockwise corners of a square; the fourth corner lies exactly on the circle.
        let v0 = Point2::new(0.0, 0.0);
        let v1 = Point2::new(0.0, 10.0);
        let v2 = Point2::new(10.0, 10.0);
        assert!(!contained_in_circumference(v0, v1, v2, Point2::new(10.0, 0.0)));
    }
}
