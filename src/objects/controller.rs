//! Per-tick behaviour attached to a body.

use serde::{Deserialize, Serialize};

use super::BodyId;
use crate::actions::Actor;
use crate::math::vec2::Vec2;

/// Length of one turret firing cycle, in milliseconds.
pub const SHOOT_CYCLE: f64 = 500.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Controller {
    /// Plain physics body: balls, walls, tiles.
    #[default]
    None,
    Actor(Actor),
    Projectile(Projectile),
    Turret(Turret),
}

/// A shot that propels itself along its rotation until its range runs out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Body that fired the shot. A shot never hurts its own source.
    pub source: Option<BodyId>,
    /// Remaining travel budget; the shot expires when this reaches zero.
    pub range: f64,
}

impl Projectile {
    pub fn new(source: Option<BodyId>, range: f64) -> Self {
        Projectile { source, range }
    }

    /// Spends `acceleration` worth of range. Returns true once the shot is spent.
    pub fn spend(&mut self, acceleration: f64) -> bool {
        self.range -= acceleration;
        self.range <= 0.0
    }
}

/// Repeating shoot cycle; fires once per cycle past the halfway mark.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Turret {
    pub counter: f64,
    pub fired: bool,
}

/// Request to spawn a shot. The world never spawns bodies by itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotRequest {
    pub source: BodyId,
    pub position: Vec2,
    pub rotation: f64,
}

impl Turret {
    /// Advances the cycle by `dt` ms. Returns true on the tick the turret fires.
    pub fn advance(&mut self, dt: f64) -> bool {
        let progress = self.counter / SHOOT_CYCLE;
        let fire = !self.fired && progress > 0.5;
        if fire {
            self.fired = true;
        }

        self.counter += dt;
        if self.counter >= SHOOT_CYCLE {
            *self = Turret::default();
        }
        fire
    }
}
