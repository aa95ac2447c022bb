//! Error types for configuration and construction boundaries.
//!
//! Collision and integration routines never fail; these errors only come out
//! of parsing config, building shapes and naming actions.

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A value that must be strictly positive was zero or negative.
    #[error("{field} must be positive, got {value}")]
    NotPositive {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A value that must not be negative was negative.
    #[error("{field} must not be negative, got {value}")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The catch-up clamp must allow at least one tick per frame.
    #[error("max_catch_up_ticks must be at least 1")]
    NoCatchUp,

    /// The JSON document could not be parsed.
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while resolving an intent's action name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("unknown action: {0}")]
    UnknownAction(String),
}

/// Errors raised while building shapes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// Polygon paths are flat `(dx, dy)` pairs, so the length must be even.
    #[error("polygon path must hold (dx, dy) pairs, got {0} coordinates")]
    OddPolygonPath(usize),
}

impl ConfigError {
    pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
        if value > 0.0 && value.is_finite() {
            Ok(())
        } else {
            Err(ConfigError::NotPositive { field, value })
        }
    }

    pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
        if value >= 0.0 && value.is_finite() {
            Ok(())
        } else {
            Err(ConfigError::Negative { field, value })
        }
    }
}
