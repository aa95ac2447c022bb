pub mod angle;
pub mod vec2;

pub use angle::{normalize_angle, Direction};
pub use vec2::Vec2;

/// Anything closer to zero than this is treated as zero.
pub const ZERO_EPSILON: f64 = 1e-10;

/// Checks if a number is close enough to zero to be treated as zero.
/// Accumulated float error turns an exact 0 into values like 1.4e-14.
#[inline]
pub fn is_zero(value: f64) -> bool {
    -ZERO_EPSILON < value && value < ZERO_EPSILON
}

/// Three-way sign: -1, 0 or 1. Unlike `f64::signum`, zero maps to zero.
#[inline]
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}
