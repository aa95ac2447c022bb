use serde::{Deserialize, Serialize};

use super::tiles::TileGrid;
use crate::collision::{check_collision, intersect_outline, ContactTarget, Correction, Counterpart};
use crate::common::config::PhysicsConfig;
use crate::common::error::ConfigError;
use crate::integration::integrator;
use crate::math::vec2::Vec2;
use crate::objects::body::Body;
use crate::objects::controller::ShotRequest;
use crate::objects::BodyId;
use crate::shapes::LineSegment;

/// One overlap found during a tick, with the flags of both parties as they
/// were when it was detected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub a: Counterpart,
    pub b: Counterpart,
    pub correction: Correction,
}

impl Contact {
    pub fn involves(&self, target: ContactTarget) -> bool {
        self.a.target == target || self.b.target == target
    }
}

/// Everything that happened during one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    pub contacts: Vec<Contact>,
    /// Shots requested by turrets. The caller decides whether to spawn them.
    pub shots: Vec<ShotRequest>,
}

/// Result of a line-of-sight query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SightLine {
    /// First point hit, or the end of the ray when nothing was in the way.
    pub end: Vec2,
    pub fraction: f64,
    pub blocker: Option<BodyId>,
}

/// Arena of bodies plus the tile grid they move over.
///
/// Bodies are addressed by `BodyId`. Removing a body leaves a hole, so ids
/// of the remaining bodies never shift.
#[derive(Debug, Clone)]
pub struct World {
    config: PhysicsConfig,
    bodies: Vec<Option<Body>>,
    tiles: TileGrid,
    tick: u64,
}

impl World {
    /// Creates an empty world without tiles.
    pub fn new(config: PhysicsConfig) -> Self {
        World { tiles: TileGrid::empty(config.tile_size), config, bodies: Vec::new(), tick: 0 }
    }

    pub fn with_tiles(config: PhysicsConfig, tiles: TileGrid) -> Self {
        World { tiles, ..World::new(config) }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn tiles(&self) -> &TileGrid {
        &self.tiles
    }

    pub fn tiles_mut(&mut self) -> &mut TileGrid {
        &mut self.tiles
    }

    /// Number of ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Adds a body to the world and returns its id.
    pub fn add_body(&mut self, body: Body) -> BodyId {
        let id = BodyId(self.bodies.len());
        log::debug!("added {} as {:?}", body.label, id);
        self.bodies.push(Some(body));
        id
    }

    /// Like `add_body`, but rejects bodies with invalid parameters.
    pub fn try_add_body(&mut self, body: Body) -> Result<BodyId, ConfigError> {
        body.validate()?;
        Ok(self.add_body(body))
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0).and_then(Option::as_ref)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies
            .iter()
            .enumerate()
            .filter_map(|(i, body)| body.as_ref().map(|body| (BodyId(i), body)))
    }

    pub fn len(&self) -> usize {
        self.bodies.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        self.bodies.get_mut(id.0).and_then(Option::take)
    }

    /// Removes and returns every body flagged as expired.
    pub fn remove_expired(&mut self) -> Vec<(BodyId, Body)> {
        let mut removed = Vec::new();
        for (i, slot) in self.bodies.iter_mut().enumerate() {
            if slot.as_ref().is_some_and(Body::is_expired) {
                if let Some(body) = slot.take() {
                    log::debug!("removed expired {} {:?}", body.label, BodyId(i));
                    removed.push((BodyId(i), body));
                }
            }
        }
        removed
    }

    /// Runs one tick of `dt` milliseconds.
    ///
    /// Every body is integrated and its controller run first. Contacts are
    /// then collected over the resulting state and applied in the order
    /// they were found.
    pub fn step(&mut self, dt: f64) -> TickReport {
        self.tick += 1;
        let config = self.config;
        let mut shots = Vec::new();

        for (i, slot) in self.bodies.iter_mut().enumerate() {
            let Some(body) = slot else { continue };
            integrator::integrate(body, dt, &config);
            if let Some(rotation) = body.run_controller(dt, &config) {
                shots.push(ShotRequest { source: BodyId(i), position: body.position, rotation });
            }
        }

        let contacts = self.find_contacts();
        for contact in &contacts {
            self.apply_contact(contact);
        }

        log::trace!(
            "tick {}: {} bodies, {} contacts, {} shots",
            self.tick,
            self.len(),
            contacts.len(),
            shots.len()
        );
        TickReport { tick: self.tick, contacts, shots }
    }

    /// All pairwise overlaps between live bodies, plus each body against
    /// the tiles within reach of its cell.
    fn find_contacts(&self) -> Vec<Contact> {
        let tile_size = self.config.tile_size;
        let live: Vec<(BodyId, &Body)> = self.bodies().filter(|(_, body)| !body.is_expired()).collect();
        let mut contacts = Vec::new();

        for (n, &(id_a, a)) in live.iter().enumerate() {
            let side_a = Counterpart::of(ContactTarget::Body(id_a), a);

            for &(id_b, b) in &live[n + 1..] {
                if let Some(correction) = check_collision(a, b) {
                    let side_b = Counterpart::of(ContactTarget::Body(id_b), b);
                    contacts.push(Contact { a: side_a, b: side_b, correction });
                }
            }

            let (col, row) = a.grid_cell(tile_size);
            for (c, r, tile) in self.tiles.neighborhood(col, row, a.tile_reach(tile_size)) {
                if let Some(correction) = check_collision(a, tile) {
                    let side_b = Counterpart::of(ContactTarget::Tile { col: c, row: r }, tile);
                    contacts.push(Contact { a: side_a, b: side_b, correction });
                }
            }
        }
        contacts
    }

    fn target_mut(&mut self, target: ContactTarget) -> Option<&mut Body> {
        match target {
            ContactTarget::Body(id) => self.body_mut(id),
            ContactTarget::Tile { col, row } => self.tiles.get_mut(col, row),
        }
    }

    fn apply_contact(&mut self, contact: &Contact) {
        let sides = [
            (contact.a.target, contact.b, contact.correction.a),
            (contact.b.target, contact.a, contact.correction.b),
        ];
        for (target, other, correction) in sides {
            let effect = self.target_mut(target).and_then(|body| body.on_collision(&other, &correction));
            if let Some(effect) = effect {
                if let Some(body) = self.target_mut(other.target) {
                    body.apply_effect(effect, Some(target));
                }
            }
        }
    }

    /// Line of sight from `source` along its rotation, out to the configured distance.
    pub fn line_of_sight(&self, source: BodyId) -> Option<SightLine> {
        self.line_of_sight_within(source, self.config.line_of_sight_distance)
    }

    /// Casts a ray of length `distance` from `source`'s anchor along its
    /// rotation and returns the nearest body outline it crosses.
    pub fn line_of_sight_within(&self, source: BodyId, distance: f64) -> Option<SightLine> {
        let origin = self.body(source)?;
        let ray = LineSegment::from_angle(origin.position, origin.rotation(), distance);
        let unobstructed = SightLine { end: ray.end, fraction: 1.0, blocker: None };

        let sight = self
            .bodies()
            .filter(|(id, _)| *id != source)
            .filter_map(|(id, body)| intersect_outline(&ray, &body.vertices()).map(|hit| (id, hit)))
            .min_by(|(_, a), (_, b)| a.fraction.total_cmp(&b.fraction))
            .map_or(unobstructed, |(id, hit)| SightLine {
                end: hit.point,
                fraction: hit.fraction,
                blocker: Some(id),
            });
        Some(sight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{ActionKind, Intent};
    use crate::math::angle::{EAST, NORTH};
    const EPSILON: f64 = 1e-9;

    fn world() -> World {
        World::new(PhysicsConfig::default())
    }

    fn ball_at(x: f64, y: f64) -> Body {
        Body { position: Vec2::new(x, y), ..Body::default() }
    }

    #[test]
    fn test_ids_are_stable_across_removal() {
        let mut world = world();
        let a = world.add_body(ball_at(0.0, 0.0));
        let b = world.add_body(ball_at(100.0, 0.0));
        assert_eq!(world.len(), 2);

        assert!(world.remove_body(a).is_some());
        assert!(world.body(a).is_none());
        assert_eq!(world.body(b).map(|body| body.position.x), Some(100.0));

        let c = world.add_body(ball_at(200.0, 0.0));
        assert_ne!(c, a);
        assert_eq!(world.len(), 2);
        assert!(world.remove_body(a).is_none());
    }

    #[test]
    fn test_try_add_body_validates() {
        let mut world = world();
        assert!(world.try_add_body(Body { size: 0.0, ..Body::default() }).is_err());
        assert!(world.try_add_body(Body::default()).is_ok());
    }

    #[test]
    fn test_step_moves_bodies() {
        let mut world = world();
        let id = world.add_body(Body { push_velocity: Vec2::new(2.0, 0.0), ..ball_at(0.0, 0.0) });
        let dt = world.config().baseline_timestep_ms;
        let report = world.step(dt);
        assert_eq!(report.tick, 1);
        assert!(report.contacts.is_empty());
        let body = world.body(id).unwrap();
        assert!((body.position.x - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_head_on_collision_transfers_momentum() {
        let mut world = world();
        let a = world.add_body(Body { push_velocity: Vec2::new(5.0, 0.0), ..ball_at(100.0, 100.0) });
        let b = world.add_body(ball_at(130.0, 100.0));
        let dt = world.config().baseline_timestep_ms;
        let report = world.step(dt);
        assert_eq!(report.contacts.len(), 1);

        // a moved to 105 and decayed to 4.9 before the contact
        let a = world.body(a).unwrap();
        let b = world.body(b).unwrap();
        assert!((a.position.x - 101.5).abs() < EPSILON);
        assert!((b.position.x - 133.5).abs() < EPSILON);
        assert!(a.push_velocity.magnitude() < 1e-6);
        assert!((b.push_velocity.x - 4.9).abs() < 1e-6);
    }

    #[test]
    fn test_ball_bounces_off_wall_tile() {
        let tiles = TileGrid::from_map(&["..#", "..#", "..#"], 32.0);
        let mut world = World::with_tiles(PhysicsConfig::default(), tiles);
        let id = world.add_body(Body { push_velocity: Vec2::new(4.0, 0.0), ..ball_at(50.0, 48.0) });
        let dt = world.config().baseline_timestep_ms;
        let report = world.step(dt);

        let wall = ContactTarget::Tile { col: 2, row: 1 };
        assert_eq!(report.contacts.iter().filter(|c| c.involves(wall)).count(), 1);
        assert!(!report.contacts.iter().any(|c| c.involves(ContactTarget::Tile { col: 2, row: 0 })));

        let body = world.body(id).unwrap();
        assert!((body.position.x - 48.0).abs() < EPSILON);
        assert!((body.push_velocity.x + 3.9).abs() < EPSILON);
        assert!(body.push_velocity.y.abs() < EPSILON);
        // Tiles never move
        assert_eq!(world.tiles().get(2, 1).map(|t| t.position), Some(Vec2::new(80.0, 48.0)));
    }

    #[test]
    fn test_shot_damages_actor_and_expires() {
        let mut world = world();
        let actor = world.add_body(Body::actor(3, 1, 32.0));
        let shot = world.add_body(Body::shot(Vec2::new(90.0, 48.0), EAST, None, 32.0));
        let dt = world.config().baseline_timestep_ms;
        let report = world.step(dt);
        assert_eq!(report.contacts.len(), 1);

        assert_eq!(world.body(actor).and_then(|b| b.vitals()).map(|v| v.health), Some(2));
        assert!(world.body(shot).unwrap().is_expired());
        // Non-solid contact leaves the actor where it was
        assert_eq!(world.body(actor).unwrap().position, Vec2::new(112.0, 48.0));

        let removed = world.remove_expired();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].0, shot);
        assert!(world.body(actor).is_some());
        assert!(world.remove_expired().is_empty());
    }

    #[test]
    fn test_shot_spares_its_source() {
        let mut world = world();
        let actor = world.add_body(Body::actor(3, 1, 32.0));
        let shot = world.add_body(Body::shot(Vec2::new(90.0, 48.0), EAST, Some(actor), 32.0));
        let dt = world.config().baseline_timestep_ms;
        world.step(dt);
        assert_eq!(world.body(actor).and_then(|b| b.vitals()).map(|v| v.health), Some(3));
        assert!(!world.body(shot).unwrap().is_expired());
    }

    #[test]
    fn test_expired_bodies_do_not_collide() {
        let mut world = world();
        world.add_body(ball_at(0.0, 0.0));
        let mut ghost = ball_at(10.0, 0.0);
        ghost.expire();
        world.add_body(ghost);
        let dt = world.config().baseline_timestep_ms;
        assert!(world.step(dt).contacts.is_empty());
    }

    #[test]
    fn test_turret_requests_shot() {
        let mut world = world();
        let turret = world.add_body(Body::turret(2, 2, 32.0));
        let dt = world.config().baseline_timestep_ms;
        let shots: Vec<ShotRequest> = (0..20).flat_map(|_| world.step(dt).shots).collect();
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].source, turret);
        assert_eq!(shots[0].position, Vec2::new(80.0, 80.0));
    }

    #[test]
    fn test_actor_dash_through_world() {
        let mut world = world();
        let id = world.add_body(Body::actor(5, 5, 32.0));
        if let Some(actor) = world.body_mut(id).and_then(Body::as_actor_mut) {
            actor.intent = Some(Intent::of(ActionKind::Dash, Vec2::new(1.0, 0.0)));
        }
        let dt = world.config().baseline_timestep_ms;
        for _ in 0..7 {
            world.step(dt);
        }
        let body = world.body(id).unwrap();
        assert!(body.push_velocity.x > 0.0);
        assert!(body.position.x > 176.0);
    }

    #[test]
    fn test_line_of_sight() {
        let mut world = world();
        let mut observer = ball_at(0.0, 0.0);
        observer.set_rotation(EAST);
        let observer = world.add_body(observer);
        let wall = world.add_body(Body::wall(2, -1, 1, 2, None, 32.0));

        let sight = world.line_of_sight(observer).unwrap();
        assert_eq!(sight.blocker, Some(wall));
        assert!((sight.end.x - 64.0).abs() < EPSILON);
        assert!((sight.fraction - 0.4).abs() < EPSILON);

        if let Some(body) = world.body_mut(observer) {
            body.set_rotation(NORTH);
        }
        let sight = world.line_of_sight(observer).unwrap();
        assert_eq!(sight.blocker, None);
        assert_eq!(sight.fraction, 1.0);
        assert!((sight.end.y + 160.0).abs() < EPSILON);

        assert!(world.line_of_sight(BodyId(99)).is_none());
    }
}
