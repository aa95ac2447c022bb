//! Fixed-timestep 2D physics and action resolution for tile-based games.
//!
//! Bodies carry two velocity channels: `move` (what the body wants) and
//! `push` (what the world does to it). Each tick the world integrates every
//! body, runs its controller, then resolves overlaps between bodies and
//! against the tile grid.

pub mod actions;
pub mod collision;
pub mod common;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use actions::{Action, ActionKind, Actor, Intent, SkillPhase};
pub use collision::{check_collision, BodyCorrection, ContactTarget, Correction, RayHit};
pub use common::{ActionError, ConfigError, PhysicsConfig, ShapeError};
pub use math::{Direction, Vec2};
pub use objects::body::Corner;
pub use objects::controller::ShotRequest;
pub use objects::{Body, BodyId, Controller, Effect, MotionConfig, Vitals};
pub use shapes::{LineSegment, PolygonPath, Shape};
pub use world::{Contact, FrameClock, SightLine, TickReport, TileGrid, World};
