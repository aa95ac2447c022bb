use serde::{Deserialize, Serialize};

use super::controller::{Controller, Projectile, Turret};
use super::effects::{Effect, Vitals};
use super::motion::MotionConfig;
use super::BodyId;
use crate::actions::Actor;
use crate::collision::{BodyCorrection, ContactTarget, Counterpart};
use crate::common::config::PhysicsConfig;
use crate::common::error::ConfigError;
use crate::math::angle::{normalize_angle, Direction, SOUTH};
use crate::math::vec2::Vec2;
use crate::shapes::{edge_normals, PolygonPath, Shape};

pub const DEFAULT_SIZE: f64 = 32.0;
pub const DEFAULT_MASS: f64 = 10.0;

/// Corner dropped from a wall rectangle to make it a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corner {
    #[serde(rename = "nw")]
    NorthWest,
    #[serde(rename = "ne")]
    NorthEast,
    #[serde(rename = "se")]
    SouthEast,
    #[serde(rename = "sw")]
    SouthWest,
}

/// A simulated body with two independent velocity channels.
///
/// `move_velocity` is what the body wants to do; `push_velocity` is what the
/// world does to it (collisions, abilities). Each channel decays and is
/// clamped separately, and the position advances by their sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub label: String,
    /// Anchor point: the centre for circles and squares, the path origin for polygons.
    pub position: Vec2,
    pub size: f64,
    pub shape: Shape,
    pub solid: bool,
    pub movable: bool,
    pub mass: f64,
    pub move_velocity: Vec2,
    pub push_velocity: Vec2,
    pub motion: MotionConfig,
    pub controller: Controller,
    pub(crate) rotation: f64,
    pub(crate) expired: bool,
}

impl Default for Body {
    fn default() -> Self {
        Body {
            label: String::from("body"),
            position: Vec2::ZERO,
            size: DEFAULT_SIZE,
            shape: Shape::Circle,
            solid: true,
            movable: true,
            mass: DEFAULT_MASS,
            move_velocity: Vec2::ZERO,
            push_velocity: Vec2::ZERO,
            motion: MotionConfig::default(),
            controller: Controller::None,
            rotation: SOUTH,
            expired: false,
        }
    }
}

/// Centre of the tile at (`col`, `row`).
fn tile_center(col: i64, row: i64, tile_size: f64) -> Vec2 {
    Vec2::new(
        col as f64 * tile_size + tile_size / 2.0,
        row as f64 * tile_size + tile_size / 2.0,
    )
}

impl Body {
    pub fn new(label: impl Into<String>, position: Vec2, size: f64, shape: Shape) -> Self {
        Body { label: label.into(), position, size, shape, ..Body::default() }
    }

    /// A plain solid ball centred on a tile.
    pub fn ball(col: i64, row: i64, tile_size: f64) -> Self {
        Body::new("ball", tile_center(col, row, tile_size), tile_size, Shape::Circle)
    }

    /// An intent-driven body.
    pub fn actor(col: i64, row: i64, tile_size: f64) -> Self {
        Body {
            controller: Controller::Actor(Actor::new()),
            ..Body::new("actor", tile_center(col, row, tile_size), tile_size, Shape::Circle)
        }
    }

    /// A body that fires a shot every cycle along its rotation.
    pub fn turret(col: i64, row: i64, tile_size: f64) -> Self {
        Body {
            controller: Controller::Turret(Turret::default()),
            ..Body::new("turret", tile_center(col, row, tile_size), tile_size, Shape::Circle)
        }
    }

    /// A self-propelled shot: half a tile wide, non-solid, with a range of its own size.
    pub fn shot(position: Vec2, rotation: f64, source: Option<BodyId>, tile_size: f64) -> Self {
        let size = tile_size / 2.0;
        let mut shot = Body {
            solid: false,
            motion: MotionConfig {
                move_acceleration: 1.0,
                move_deceleration: 0.0,
                move_max_speed: Some(size * 2.0),
                ..MotionConfig::default()
            },
            controller: Controller::Projectile(Projectile::new(source, size)),
            ..Body::new("shot", position, size, Shape::Circle)
        };
        shot.set_rotation(rotation);
        shot
    }

    /// An immovable solid block spanning `width` × `height` tiles from the
    /// top-left corner of tile (`col`, `row`). Dropping a corner makes it a
    /// right triangle.
    pub fn wall(col: i64, row: i64, width: u32, height: u32, cut_corner: Option<Corner>, tile_size: f64) -> Self {
        let w = width as f64 * tile_size;
        let h = height as f64 * tile_size;
        let corners = [
            (Corner::NorthWest, Vec2::new(0.0, 0.0)),
            (Corner::NorthEast, Vec2::new(w, 0.0)),
            (Corner::SouthEast, Vec2::new(w, h)),
            (Corner::SouthWest, Vec2::new(0.0, h)),
        ];
        let offsets = corners
            .iter()
            .filter(|(corner, _)| Some(*corner) != cut_corner)
            .map(|&(_, offset)| offset)
            .collect();

        Body {
            movable: false,
            ..Body::new(
                "wall",
                Vec2::new(col as f64 * tile_size, row as f64 * tile_size),
                tile_size,
                Shape::Polygon(PolygonPath::new(offsets)),
            )
        }
    }

    /// A non-solid floor tile. Make it solid to turn it into a wall tile.
    pub fn tile(col: i64, row: i64, tile_size: f64) -> Self {
        Body {
            solid: false,
            movable: false,
            ..Body::new("tile", tile_center(col, row, tile_size), tile_size, Shape::Square)
        }
    }

    /// Checks the invariants a body must hold before it joins a world.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("size", self.size)?;
        if self.movable && self.solid {
            ConfigError::require_positive("mass", self.mass)?;
        }
        self.motion.validate()
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Stores `rotation` normalised to (-π, π].
    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = normalize_angle(rotation);
    }

    /// Four-way facing used for sprite selection.
    pub fn facing(&self) -> Direction {
        Direction::from_rotation(self.rotation)
    }

    pub fn radius(&self) -> f64 {
        self.size / 2.0
    }

    pub fn vertices(&self) -> Vec<Vec2> {
        self.shape.vertices(self.position, self.size)
    }

    pub fn edge_normals(&self) -> Vec<Vec2> {
        edge_normals(&self.vertices())
    }

    pub fn move_speed(&self) -> f64 {
        self.move_velocity.magnitude()
    }

    pub fn push_speed(&self) -> f64 {
        self.push_velocity.magnitude()
    }

    /// Grid cell (col, row) containing the anchor.
    pub fn grid_cell(&self, tile_size: f64) -> (i64, i64) {
        (
            (self.position.x / tile_size).floor() as i64,
            (self.position.y / tile_size).floor() as i64,
        )
    }

    /// Half-width, in tiles, of the neighbourhood this body can touch.
    pub fn tile_reach(&self, tile_size: f64) -> i64 {
        (self.size / tile_size).ceil() as i64
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub fn expire(&mut self) {
        self.expired = true;
    }

    pub fn as_actor(&self) -> Option<&Actor> {
        match &self.controller {
            Controller::Actor(actor) => Some(actor),
            _ => None,
        }
    }

    pub fn as_actor_mut(&mut self) -> Option<&mut Actor> {
        match &mut self.controller {
            Controller::Actor(actor) => Some(actor),
            _ => None,
        }
    }

    pub fn vitals(&self) -> Option<&Vitals> {
        self.as_actor().map(|actor| &actor.vitals)
    }

    pub fn is_defeated(&self) -> bool {
        self.vitals().is_some_and(Vitals::is_defeated)
    }

    /// Delivers an effect from `source`. Bodies without vitals shrug it off.
    pub fn apply_effect(&mut self, effect: Effect, source: Option<ContactTarget>) -> bool {
        let applied = self.as_actor_mut().is_some_and(|actor| actor.vitals.apply(effect));
        if applied {
            log::debug!("{} takes {:?} from {:?}", self.label, effect, source);
        }
        applied
    }

    /// Move deceleration after the current action's overrides.
    pub fn effective_move_deceleration(&self) -> f64 {
        match self.as_actor() {
            Some(actor) => actor.move_deceleration(self.motion.move_deceleration),
            None => self.motion.move_deceleration,
        }
    }

    /// Push deceleration after the current action's overrides.
    pub fn effective_push_deceleration(&self) -> f64 {
        match self.as_actor() {
            Some(actor) => actor.push_deceleration(self.motion.push_deceleration),
            None => self.motion.push_deceleration,
        }
    }

    /// Runs the controller for one tick. Returns `Some(rotation)` when a turret fires.
    pub fn run_controller(&mut self, dt: f64, config: &PhysicsConfig) -> Option<f64> {
        let mut controller = std::mem::take(&mut self.controller);
        let mut fired = None;

        match &mut controller {
            Controller::None => {}
            Controller::Actor(actor) => {
                actor.process_intent();
                actor.process_action(self, dt, config);
                crate::integration::limit_speed(self);
                actor.vitals.tick(dt);
            }
            Controller::Projectile(projectile) => {
                let acceleration = self.motion.move_acceleration * config.time_correction(dt);
                self.move_velocity += Vec2::from_polar(acceleration, self.rotation);
                if projectile.spend(acceleration) {
                    self.expire();
                }
            }
            Controller::Turret(turret) => {
                if turret.advance(dt) {
                    fired = Some(self.rotation);
                }
            }
        }

        self.controller = controller;
        fired
    }

    /// Reacts to a contact: bounce, apply the positional correction, then run
    /// the controller's own reaction. Returns an effect to deliver to `other`.
    pub fn on_collision(&mut self, other: &Counterpart, correction: &BodyCorrection) -> Option<Effect> {
        self.bounce(other, correction);
        self.position += correction.delta;

        match &self.controller {
            Controller::Projectile(projectile) => {
                let own_source = matches!(
                    (other.target, projectile.source),
                    (ContactTarget::Body(id), Some(source)) if id == source
                );
                if !own_source && other.solid {
                    self.expire();
                    Some(Effect::Damage)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn bounce(&mut self, other: &Counterpart, correction: &BodyCorrection) {
        if !self.movable || !self.solid || !other.solid {
            return;
        }

        if !other.movable {
            let speed = self.push_velocity.magnitude();
            if self.shape.is_circle() && other.circle {
                self.push_velocity = Vec2::from_polar(speed, correction.delta.angle());
            } else if self.shape.is_circle() && other.polygonal {
                let reverse = (-self.push_velocity).angle();
                let normal = correction.delta.angle();
                self.push_velocity = Vec2::from_polar(speed, reverse + 2.0 * (normal - reverse));
            }
        } else if let Some(push) = correction.push {
            self.push_velocity = push;
        }
    }
}
