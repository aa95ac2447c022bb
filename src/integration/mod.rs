pub mod integrator;

pub use integrator::{clamp_speed, decelerate, integrate, limit_speed};
