//! Per-body tuning for the two velocity channels.

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;

pub const MOVE_MAX_SPEED: f64 = 4.0;
pub const PUSH_MAX_SPEED: f64 = 32.0;
pub const MOVE_ACCELERATION: f64 = 0.4;
pub const MOVE_DECELERATION: f64 = 0.4;
pub const PUSH_DECELERATION: f64 = 0.1;

/// Acceleration, deceleration and speed caps, all per baseline tick.
///
/// There is no push acceleration: the push channel is only ever set by
/// collisions and abilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub move_acceleration: f64,
    pub move_deceleration: f64,
    /// `None` disables the clamp.
    pub move_max_speed: Option<f64>,
    pub push_deceleration: f64,
    pub push_max_speed: Option<f64>,
}

impl Default for MotionConfig {
    fn default() -> Self {
        MotionConfig {
            move_acceleration: MOVE_ACCELERATION,
            move_deceleration: MOVE_DECELERATION,
            move_max_speed: Some(MOVE_MAX_SPEED),
            push_deceleration: PUSH_DECELERATION,
            push_max_speed: Some(PUSH_MAX_SPEED),
        }
    }
}

impl MotionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_non_negative("move_acceleration", self.move_acceleration)?;
        ConfigError::require_non_negative("move_deceleration", self.move_deceleration)?;
        ConfigError::require_non_negative("push_deceleration", self.push_deceleration)?;
        if let Some(max) = self.move_max_speed {
            ConfigError::require_non_negative("move_max_speed", max)?;
        }
        if let Some(max) = self.push_max_speed {
            ConfigError::require_non_negative("push_max_speed", max)?;
        }
        Ok(())
    }
}
