pub mod config;
pub mod error;

pub use config::PhysicsConfig;
pub use error::{ActionError, ConfigError, ShapeError};
