//! Rotation helpers. Rotation is clockwise-positive in screen space (y down),
//! 0 rad faces east and +PI/2 faces south.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub const EAST: f64 = 0.0;
pub const SOUTHEAST: f64 = PI * 0.25;
pub const SOUTH: f64 = PI * 0.5;
pub const SOUTHWEST: f64 = PI * 0.75;
pub const WEST: f64 = PI;
pub const NORTHWEST: f64 = PI * -0.75;
pub const NORTH: f64 = PI * -0.5;
pub const NORTHEAST: f64 = PI * -0.25;

/// Wraps an angle in radians into the half-open range (-PI, PI].
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    if angle > -PI && angle <= PI {
        return angle;
    }
    PI - (PI - angle).rem_euclid(2.0 * PI)
}

/// Coarse four-way facing, used to pick sprite rows and for gameplay
/// checks that don't need the precise angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    East,
    South,
    West,
    North,
}

impl Direction {
    /// East and west win when the rotation is exactly on a diagonal.
    pub fn from_rotation(rotation: f64) -> Self {
        let r = normalize_angle(rotation);
        if (-PI * 0.25..=PI * 0.25).contains(&r) {
            Direction::East
        } else if r > PI * 0.25 && r < PI * 0.75 {
            Direction::South
        } else if r < -PI * 0.25 && r > -PI * 0.75 {
            Direction::North
        } else {
            Direction::West
        }
    }
}
