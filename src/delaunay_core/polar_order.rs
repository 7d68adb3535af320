use std::cmp::Ordering;

use crate::Point2;

/// Orders points counterclockwise by their angle around a pivot.
///
/// Angles start at the positive x axis. Points with equal angle are ordered by their distance
/// to the pivot, nearest first.
#[derive(Clone, Copy, Debug)]
pub struct PolarAngleOrder {
    pivot: Point2<f64>,
}

fn half_plane(d: Point2<f64>) -> u8 {
    if d.y > 0.0 || (d.y == 0.0 && d.x > 0.0) {
        0
    } else {
        1
    }
}

impl PolarAngleOrder {
    pub fn new(pivot: Point2<f64>) -> Self {
        PolarAngleOrder { pivot }
    }

    pub fn compare(&self, a: Point2<f64>, b: Point2<f64>) -> Ordering {
        let da = a.sub(self.pivot);
        let db = b.sub(self.pivot);
        half_plane(da).cmp(&half_plane(db)).then_with(|| {
            let cross = da.x * db.y - da.y * db.x;
            if cross > 0.0 {
                Ordering::Less
            } else if cross < 0.0 {
                Ordering::Greater
            } else {
                da.length2()
                    .partial_cmp(&db.length2())
                    .unwrap_or(Ordering::Equal)
            }
        })
    }

    /// Angle of `p` around the pivot in `[0, 2π)`.
    pub fn angle(&self, p: Point2<f64>) -> f64 {
        let d = p.sub(self.pivot);
        let angle = d.y.atan2(d.x);
        if angle < 0.0 {
            angle + std::f64::consts::TAU
        } else {
            angle
        }
    }

    /// Sorts `items` counterclockwise and rotates them such that the widest angular gap lies
    /// between the last and the first item.
    ///
    /// For points that all lie within a cone of less than 180° around the pivot, the result
    /// sweeps that cone from its clockwise to its counterclockwise end.
    pub fn sort_open<T>(&self, items: &mut [T], position: impl Fn(&T) -> Point2<f64>) {
        items.sort_by(|a, b| self.compare(position(a), position(b)));
        if items.len() < 2 {
            return;
        }

        let angles: Vec<_> = items.iter().map(|item| self.angle(position(item))).collect();
        let mut widest = (0.0, 0);
        for (index, angle) in angles.iter().enumerate() {
            let next = (index + 1) % angles.len();
            let mut gap = angles[next] - angle;
            if gap <= 0.0 {
                gap += std::f64::consts::TAU;
            }
            if gap > widest.0 {
                widest = (gap, next);
            }
        }
        items.rotate_left(widest.1);
    }
}
