//! Geometry helpers for positions and movement on the court

mod point;
mod vector;
mod velocity;

pub use point::{Point, line_intersection};
pub use vector::Vector;
pub use velocity::Velocity;
