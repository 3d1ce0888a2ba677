use super::Vector;
use serde::{Deserialize, Serialize};

/// Direction and speed of a moving element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub direction: Vector,
    pub speed: f64,
}

impl Velocity {
    pub fn new(direction: Vector, speed: f64) -> Self {
        Self { direction, speed }
    }

    /// Velocity pointing at `direction` with no speed
    pub fn zeroed(direction: Vector) -> Self {
        Self::new(direction, 0.0)
    }

    /// Sums both velocities as vectors.
    ///
    /// When they cancel each other out the result keeps this direction with
    /// a speed of zero.
    pub fn combine(self, other: Velocity) -> Self {
        let x = self.direction.cos() * self.speed + other.direction.cos() * other.speed;
        let y = self.direction.sin() * self.speed + other.direction.sin() * other.speed;

        match Vector::new(x, y) {
            Ok(sum) => Self::new(sum.normalize(), sum.length()),
            Err(_) => Self::zeroed(self.direction),
        }
    }
}
