//! Gameplay effects delivered through collision notifications.

use serde::{Deserialize, Serialize};

pub const DEFAULT_HEALTH: u32 = 3;
/// Milliseconds of immunity after taking damage.
pub const INVULNERABILITY_WINDOW: f64 = 3000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Damage,
}

/// Health pool of an actor-class body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub health: u32,
    pub invulnerability_ms: f64,
}

impl Default for Vitals {
    fn default() -> Self {
        Vitals { health: DEFAULT_HEALTH, invulnerability_ms: 0.0 }
    }
}

impl Vitals {
    /// Returns true if the effect changed anything.
    pub fn apply(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::Damage => {
                if self.invulnerability_ms > 0.0 {
                    return false;
                }
                self.health = self.health.saturating_sub(1);
                self.invulnerability_ms = INVULNERABILITY_WINDOW;
                true
            }
        }
    }

    pub fn tick(&mut self, dt: f64) {
        if self.invulnerability_ms > 0.0 {
            self.invulnerability_ms = (self.invulnerability_ms - dt).max(0.0);
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }
}
