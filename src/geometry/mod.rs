//! Geometry module: Stage coordinates and the per-command motion math.
//!
//! Stage space is centred on the origin with `+y` pointing up. Directions
//! are compass-style degrees: 0 is up, 90 is right, -90 is left.

mod heading;
mod point;

pub use heading::{direction_towards, normalize_direction, random_direction, step_delta};
pub use point::{Bounds, Point};
