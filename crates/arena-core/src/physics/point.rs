use crate::error::{ArenaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An exact point on the court
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to `target`
    pub fn distance_to(&self, target: Point) -> f64 {
        let dx = f64::from(target.x) - f64::from(self.x);
        let dy = f64::from(target.y) - f64::from(self.y);
        dx.hypot(dy)
    }

    /// Point halfway between this point and `target`, rounded to the nearest unit
    pub fn middle_point_to(&self, target: Point) -> Point {
        let mid = |a: i32, b: i32| ((f64::from(a) + f64::from(b)) / 2.0).round() as i32;
        Point {
            x: mid(self.x, target.x),
            y: mid(self.y, target.y),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.x, self.y)
    }
}

/// Finds where the line through `a1`-`a2` crosses the line through `b1`-`b2`.
///
/// Returns the crossing point and whether it lies on both segments. Used to
/// tell whether the ball crossed a line (e.g. the goal line) between two frames.
/// See <https://en.wikipedia.org/wiki/Line%E2%80%93line_intersection#Given_two_points_on_each_line>
pub fn line_intersection(a1: Point, a2: Point, b1: Point, b2: Point) -> Result<(Point, bool)> {
    let (ax1, ay1, ax2, ay2) = (wide(a1.x), wide(a1.y), wide(a2.x), wide(a2.y));
    let (bx1, by1, bx2, by2) = (wide(b1.x), wide(b1.y), wide(b2.x), wide(b2.y));

    let div = (ax1 - ax2) * (by1 - by2) - (ay1 - ay2) * (bx1 - bx2);
    if div == 0 {
        return Err(ArenaError::ParallelLines);
    }

    // Products of i32 coordinates reach 2^96, past what i64 holds
    let a_cross = ax1 * ay2 - ay1 * ax2;
    let b_cross = bx1 * by2 - by1 * bx2;
    let quo_x = a_cross * (bx1 - bx2) - (ax1 - ax2) * b_cross;
    let quo_y = a_cross * (by1 - by2) - (ay1 - ay2) * b_cross;

    let cross = Point {
        x: i32::try_from(quo_x / div).map_err(|_| ArenaError::OutOfRange)?,
        y: i32::try_from(quo_y / div).map_err(|_| ArenaError::OutOfRange)?,
    };

    let touches = is_between(cross.x, a1.x, a2.x)
        && is_between(cross.y, a1.y, a2.y)
        && is_between(cross.x, b1.x, b2.x)
        && is_between(cross.y, b1.y, b2.y);

    Ok((cross, touches))
}

fn wide(v: i32) -> i128 {
    i128::from(v)
}

fn is_between(target: i32, a: i32, b: i32) -> bool {
    target >= a.min(b) && target <= a.max(b)
}
