//! Momentum exchange between two solid, movable bodies.

use crate::math::vec2::Vec2;
use crate::objects::body::Body;
use std::f64::consts::FRAC_PI_2;

/// Post-collision push velocities for A and B, or `None` if momentum does
/// not transfer (either side immovable, non-solid or massless).
///
/// Treats the contact as a 1D elastic collision along the line of centres;
/// the tangential component of each push velocity is kept.
pub fn post_collision_push(a: &Body, b: &Body) -> Option<(Vec2, Vec2)> {
    if !(a.movable && b.movable && a.solid && b.solid) {
        return None;
    }
    let total_mass = a.mass + b.mass;
    if a.mass == 0.0 || b.mass == 0.0 || total_mass == 0.0 {
        return None;
    }

    let contact_angle = (b.position - a.position).angle();
    let a_speed = a.push_velocity.magnitude();
    let a_angle = a.push_velocity.angle();
    let b_speed = b.push_velocity.magnitude();
    let b_angle = b.push_velocity.angle();

    let a_normal = (a_speed * (a_angle - contact_angle).cos() * (a.mass - b.mass)
        + 2.0 * b.mass * b_speed * (b_angle - contact_angle).cos())
        / total_mass;
    let b_normal = (b_speed * (b_angle - contact_angle).cos() * (b.mass - a.mass)
        + 2.0 * a.mass * a_speed * (a_angle - contact_angle).cos())
        / total_mass;

    let tangent = contact_angle + FRAC_PI_2;
    let a_push = Vec2::from_polar(a_normal, contact_angle)
        + Vec2::from_polar(a_speed * (a_angle - contact_angle).sin(), tangent);
    let b_push = Vec2::from_polar(b_normal, contact_angle)
        + Vec2::from_polar(b_speed * (b_angle - contact_angle).sin(), tangent);

    Some((a_push, b_push))
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-6;

    fn ball_at(x: f64, y: f64, push: Vec2, mass: f64) -> Body {
        Body { position: Vec2::new(x, y), push_velocity: push, mass, ..Body::default() }
    }

    #[test]
    fn test_equal_masses_swap_velocities_head_on() {
        let a = ball_at(0.0, 0.0, Vec2::new(5.0, 0.0), 10.0);
        let b = ball_at(30.0, 0.0, Vec2::ZERO, 10.0);
        let (pa, pb) = post_collision_push(&a, &b).unwrap();
        assert!(pa.magnitude() < EPSILON);
        assert!((pb.x - 5.0).abs() < EPSILON);
        assert!(pb.y.abs() < EPSILON);
    }

    #[test]
    fn test_momentum_is_conserved_along_contact() {
        let a = ball_at(0.0, 0.0, Vec2::new(4.0, 1.0), 10.0);
        let b = ball_at(20.0, 20.0, Vec2::new(-2.0, -3.0), 30.0);
        let (pa, pb) = post_collision_push(&a, &b).unwrap();
        let before = a.push_velocity * a.mass + b.push_velocity * b.mass;
        let after = pa * a.mass + pb * b.mass;
        assert!((before.x - after.x).abs() < EPSILON);
        assert!((before.y - after.y).abs() < EPSILON);
    }

    #[test]
    fn test_tangential_component_is_kept() {
        // Contact along x; a's y motion is untouched
        let a = ball_at(0.0, 0.0, Vec2::new(0.0, 3.0), 10.0);
        let b = ball_at(30.0, 0.0, Vec2::ZERO, 10.0);
        let (pa, pb) = post_collision_push(&a, &b).unwrap();
        assert!(pa.x.abs() < EPSILON);
        assert!((pa.y - 3.0).abs() < EPSILON);
        assert!(pb.magnitude() < EPSILON);
    }

    #[test]
    fn test_no_exchange_without_mass_or_mobility() {
        let a = ball_at(0.0, 0.0, Vec2::new(5.0, 0.0), 10.0);
        let massless = ball_at(30.0, 0.0, Vec2::ZERO, 0.0);
        assert!(post_collision_push(&a, &massless).is_none());

        let post = Body { movable: false, ..ball_at(30.0, 0.0, Vec2::ZERO, 10.0) };
        assert!(post_collision_push(&a, &post).is_none());

        let ghost = Body { solid: false, ..ball_at(30.0, 0.0, Vec2::ZERO, 10.0) };
        assert!(post_collision_push(&ghost, &a).is_none());
    }
}
