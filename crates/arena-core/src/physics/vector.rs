use super::Point;
use crate::error::{ArenaError, Result};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::f64::consts::PI;

/// A direction with a length on the court.
///
/// A vector always has a length: every operation that would produce the
/// zero vector fails with [`ArenaError::ZeroLengthVector`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawVector")]
pub struct Vector {
    x: f64,
    y: f64,
}

#[derive(Deserialize)]
struct RawVector {
    x: f64,
    y: f64,
}

impl TryFrom<RawVector> for Vector {
    type Error = ArenaError;

    fn try_from(raw: RawVector) -> Result<Self> {
        Vector::new(raw.x, raw.y)
    }
}

impl Serialize for Vector {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Vector", 3)?;
        state.serialize_field("ang", &self.angle_degrees())?;
        state.serialize_field("x", &self.x)?;
        state.serialize_field("y", &self.y)?;
        state.end()
    }
}

impl Vector {
    pub const NORTH: Vector = Vector { x: 0.0, y: 1.0 };
    pub const SOUTH: Vector = Vector { x: 0.0, y: -1.0 };
    pub const EAST: Vector = Vector { x: 1.0, y: 0.0 };
    pub const WEST: Vector = Vector { x: -1.0, y: 0.0 };
    pub const NORTH_EAST: Vector = Vector { x: 1.0, y: 1.0 };
    pub const SOUTH_EAST: Vector = Vector { x: 1.0, y: -1.0 };
    pub const NORTH_WEST: Vector = Vector { x: -1.0, y: 1.0 };
    pub const SOUTH_WEST: Vector = Vector { x: -1.0, y: -1.0 };

    pub fn new(x: f64, y: f64) -> Result<Self> {
        check_length(x, y)?;
        Ok(Self { x, y })
    }

    /// Vector pointing from `from` to `to`
    pub fn between(from: Point, to: Point) -> Result<Self> {
        Self::new(
            f64::from(to.x) - f64::from(from.x),
            f64::from(to.y) - f64::from(from.y),
        )
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn with_x(self, x: f64) -> Result<Self> {
        Self::new(x, self.y)
    }

    pub fn with_y(self, y: f64) -> Result<Self> {
        Self::new(self.x, y)
    }

    /// Same length, rotated 90 degrees clockwise
    pub fn perpendicular(self) -> Self {
        Self {
            x: self.y,
            y: -self.x,
        }
    }

    /// Same direction, scaled to a length of 100
    pub fn normalize(self) -> Self {
        let length = self.length();
        Self {
            x: self.x * 100.0 / length,
            y: self.y * 100.0 / length,
        }
    }

    pub fn with_length(self, length: f64) -> Result<Self> {
        self.scale(length / self.length())
    }

    pub fn invert(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }

    pub fn scale(self, t: f64) -> Result<Self> {
        Self::new(self.x * t, self.y * t)
    }

    pub fn sin(&self) -> f64 {
        self.y / self.length()
    }

    pub fn cos(&self) -> f64 {
        self.x / self.length()
    }

    /// Angle with the X axis, in radians
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn angle_degrees(&self) -> f64 {
        self.angle() * 180.0 / PI
    }

    /// Unsigned angle with the X axis, in radians
    pub fn opposite_angle(&self) -> f64 {
        self.cos().acos()
    }

    /// Rotates the vector counter-clockwise by `degrees`, keeping its length
    pub fn add_angle_degrees(self, degrees: f64) -> Self {
        let angle = (self.angle_degrees() + degrees) * PI / 180.0;
        let length = self.length();
        Self {
            x: length * angle.cos(),
            y: length * angle.sin(),
        }
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn try_add(self, other: Vector) -> Result<Self> {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn try_sub(self, other: Vector) -> Result<Self> {
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Point reached when this vector is applied to `point`
    pub fn target_from(&self, point: Point) -> Point {
        Point {
            x: point.x + self.x.round() as i32,
            y: point.y + self.y.round() as i32,
        }
    }

    /// Signed angle from this vector to `other`, in degrees with two decimals.
    ///
    /// Positive when `other` points further north than this vector.
    pub fn angle_with(&self, other: Vector) -> f64 {
        let me = self.normalize();
        let them = other.normalize();

        let dot = me.x * them.x + me.y * them.y;
        let cos = (dot / (me.length() * them.length())).clamp(-1.0, 1.0);
        let angle = (cos.acos() * (180.0 / PI) * 100.0).round() / 100.0;
        if me.y > them.y { -angle } else { angle }
    }

    /// Whether `obstacle` lies on the path this vector draws from `from`
    pub fn is_obstacle(&self, from: Point, obstacle: Point) -> bool {
        let to = self.target_from(from);
        let a = from.distance_to(obstacle);
        let b = obstacle.distance_to(to);
        let hypotenuse = from.distance_to(to);
        (a + b - hypotenuse).round() < 0.1
    }
}

fn check_length(x: f64, y: f64) -> Result<()> {
    if x == 0.0 && y == 0.0 {
        return Err(ArenaError::ZeroLengthVector);
    }
    Ok(())
}
