//! World-level configuration.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Edge length of a grid tile, in world units.
pub const TILE_SIZE: f64 = 32.0;

/// Simulation runs against a 60 steps/second baseline; every speed and
/// acceleration constant is expressed per baseline tick.
pub const EXPECTED_FRAMES_PER_SECOND: f64 = 60.0;
pub const EXPECTED_TIMESTEP: f64 = 1000.0 / EXPECTED_FRAMES_PER_SECOND;

/// Parameters shared by every body and tile in a world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub tile_size: f64,
    /// Baseline tick duration in milliseconds.
    pub baseline_timestep_ms: f64,
    /// Upper bound on ticks run to catch up after a stall.
    pub max_catch_up_ticks: u32,
    pub line_of_sight_distance: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig {
            tile_size: TILE_SIZE,
            baseline_timestep_ms: EXPECTED_TIMESTEP,
            max_catch_up_ticks: 10,
            line_of_sight_distance: TILE_SIZE * 5.0,
        }
    }
}

impl PhysicsConfig {
    /// Parses a JSON document, filling missing fields with defaults, and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: PhysicsConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("tile_size", self.tile_size)?;
        ConfigError::require_positive("baseline_timestep_ms", self.baseline_timestep_ms)?;
        ConfigError::require_non_negative("line_of_sight_distance", self.line_of_sight_distance)?;
        if self.max_catch_up_ticks == 0 {
            return Err(ConfigError::NoCatchUp);
        }
        Ok(())
    }

    /// Ratio between a real elapsed time and the baseline tick.
    #[inline]
    pub fn time_correction(&self, dt_ms: f64) -> f64 {
        dt_ms / self.baseline_timestep_ms
    }

    /// Longest stretch of real time the frame clock will try to catch up on.
    pub fn max_accumulated_ms(&self) -> f64 {
        self.baseline_timestep_ms * self.max_catch_up_ticks as f64
    }
}
