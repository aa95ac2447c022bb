pub mod body;
pub mod controller;
pub mod effects;
pub mod motion;

pub use body::Body;
pub use controller::{Controller, Projectile, Turret};
pub use effects::{Effect, Vitals};
pub use motion::MotionConfig;

use serde::{Deserialize, Serialize};

/// Stable handle to a body stored in a `World`. Ids are never reused, so a
/// handle stays valid (or dangles harmlessly) after other bodies are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub usize);
