pub mod correction;
pub mod detection;
pub mod momentum;
pub mod raycast;

pub use correction::{correction_fractions, BodyCorrection, ContactTarget, Correction, Counterpart};
pub use detection::check_collision;
pub use momentum::post_collision_push;
pub use raycast::{intersect, intersect_outline, RayHit};
