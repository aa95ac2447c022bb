use crate::math::angle::{EAST, NORTH, NORTHEAST, NORTHWEST, SOUTH, SOUTHEAST, SOUTHWEST, WEST};
use crate::math::vec2::Vec2;

/// Sample angles for turning a circle into an octagon, clockwise from east.
pub const CIRCLE_APPROXIMATION: [f64; 8] =
    [EAST, SOUTHEAST, SOUTH, SOUTHWEST, WEST, NORTHWEST, NORTH, NORTHEAST];

/// Eight points on the circle of `radius` around `center`.
pub fn approximate(center: Vec2, radius: f64) -> Vec<Vec2> {
    CIRCLE_APPROXIMATION
        .iter()
        .map(|&angle| center + Vec2::from_polar(radius, angle))
        .collect()
}
