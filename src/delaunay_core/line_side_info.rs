use super::math::EPSILON;

/// Describes on which side of a directed line a point lies.
///
/// Created by [side_query](crate::math::side_query) and by the [Kernel](crate::Kernel)
/// implementations. "Left" refers to a right handed coordinate system (x axis pointing right,
/// y axis pointing up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineSide {
    /// The point lies strictly left of the line.
    Left,
    /// The point lies on the line.
    Center,
    /// The point lies strictly right of the line.
    Right,
}

impl LineSide {
    /// Classifies a cross product. Magnitudes below [EPSILON] count as collinear.
    #[inline]
    pub fn from_determinant(determinant: f64) -> LineSide {
        if determinant.abs() < EPSILON {
            LineSide::Center
        } else if determinant > 0.0 {
            LineSide::Left
        } else {
            LineSide::Right
        }
    }

    /// Returns `true` if a point lies on the left side of a line.
    ///
    /// This method returns `false` if the point lies exactly on the line.
    pub fn is_on_left_side(self) -> bool {
        self == LineSide::Left
    }

    /// Returns `true` if a point lies on the right side of a line.
    ///
    /// This method returns `false` if the point lies exactly on the line.
    pub fn is_on_right_side(self) -> bool {
        self == LineSide::Right
    }

    /// Returns `true` if a point lies on the left side of a line or is on the line itself.
    pub fn is_on_left_side_or_on_line(self) -> bool {
        self != LineSide::Right
    }

    /// Returns `true` if a point lies on the right side of a line or is on the line itself.
    pub fn is_on_right_side_or_on_line(self) -> bool {
        self != LineSide::Left
    }

    /// Returns `true` if a point lies exactly on this line.
    #[inline]
    pub fn is_on_line(self) -> bool {
        self == LineSide::Center
    }

    /// Returns the opposite of this `LineSide`.
    pub fn reversed(self) -> LineSide {
        match self {
            LineSide::Left => LineSide::Right,
            LineSide::Center => LineSide::Center,
            LineSide::Right => LineSide::Left,
        }
    }
}
