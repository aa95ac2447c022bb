use crate::common::config::PhysicsConfig;
use crate::math::vec2::Vec2;
use crate::objects::body::Body;

/// Advances a body by `dt` milliseconds.
///
/// Moves the body by the sum of both channels scaled to the baseline tick,
/// then decays and clamps each channel on its own. Deceleration uses the
/// values after the current action's overrides.
pub fn integrate(body: &mut Body, dt: f64, config: &PhysicsConfig) {
    if !body.movable {
        return;
    }
    let time_correction = config.time_correction(dt);

    body.position += (body.move_velocity + body.push_velocity) * time_correction;

    let move_deceleration = body.effective_move_deceleration();
    let push_deceleration = body.effective_push_deceleration();
    body.move_velocity = decelerate(body.move_velocity, move_deceleration * time_correction);
    body.push_velocity = decelerate(body.push_velocity, push_deceleration * time_correction);

    limit_speed(body);
}

/// Clamps both channels to the body's configured maximum speeds.
pub fn limit_speed(body: &mut Body) {
    if !body.movable {
        return;
    }
    body.move_velocity = clamp_speed(body.move_velocity, body.motion.move_max_speed);
    body.push_velocity = clamp_speed(body.push_velocity, body.motion.push_max_speed);
}

/// Shrinks the vector's magnitude by `amount`, never past zero, keeping its
/// direction.
pub fn decelerate(velocity: Vec2, amount: f64) -> Vec2 {
    let speed = velocity.magnitude();
    if speed == 0.0 || !amount.is_finite() || amount <= 0.0 {
        return velocity;
    }
    let reduced = (speed - amount).max(0.0);
    Vec2::from_polar(reduced, velocity.angle())
}

/// Caps the vector's magnitude at `max`, keeping its direction. `None` or a
/// negative max disables the cap.
pub fn clamp_speed(velocity: Vec2, max: Option<f64>) -> Vec2 {
    match max {
        Some(max) if max >= 0.0 => {
            let speed = velocity.magnitude();
            if speed > max {
                Vec2::from_polar(max, velocity.angle())
            } else {
                velocity
            }
        }
        _ => velocity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{ActionKind, Intent};
    use crate::objects::motion::MotionConfig;
    const EPSILON: f64 = 1e-9;

    fn config() -> PhysicsConfig {
        PhysicsConfig::default()
    }

    #[test]
    fn test_integrate_moves_by_both_channels() {
        let config = config();
        let mut body = Body {
            move_velocity: Vec2::new(2.0, 0.0),
            push_velocity: Vec2::new(0.0, 3.0),
            ..Body::default()
        };
        integrate(&mut body, config.baseline_timestep_ms, &config);
        assert!((body.position.x - 2.0).abs() < EPSILON);
        assert!((body.position.y - 3.0).abs() < EPSILON);
        // Decelerated after moving
        assert!((body.move_velocity.x - 1.6).abs() < EPSILON);
        assert!((body.push_velocity.y - 2.9).abs() < EPSILON);
    }

    #[test]
    fn test_integrate_scales_with_timestep() {
        let config = config();
        let mut body = Body { push_velocity: Vec2::new(3.0, 0.0), ..Body::default() };
        integrate(&mut body, config.baseline_timestep_ms * 2.0, &config);
        assert!((body.position.x - 6.0).abs() < EPSILON);
        assert!((body.push_velocity.x - 2.8).abs() < EPSILON);
    }

    #[test]
    fn test_immovable_body_is_not_integrated() {
        let config = config();
        let mut body = Body { movable: false, push_velocity: Vec2::new(3.0, 0.0), ..Body::default() };
        integrate(&mut body, config.baseline_timestep_ms, &config);
        assert_eq!(body.position, Vec2::ZERO);
        assert_eq!(body.push_velocity, Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_deceleration_keeps_direction_and_floors_at_zero() {
        let v = decelerate(Vec2::new(3.0, 4.0), 1.0);
        assert!((v.magnitude() - 4.0).abs() < EPSILON);
        assert!((v.angle() - Vec2::new(3.0, 4.0).angle()).abs() < EPSILON);
        assert_eq!(decelerate(Vec2::new(0.3, 0.0), 1.0), Vec2::ZERO);
        assert_eq!(decelerate(Vec2::ZERO, 1.0), Vec2::ZERO);
    }

    #[test]
    fn test_deceleration_never_increases_speed() {
        let samples = [Vec2::new(1.0, -2.0), Vec2::new(-0.01, 0.02), Vec2::new(40.0, 3.0)];
        for v in samples {
            for amount in [0.0, 0.05, 0.4, 100.0, f64::NAN] {
                assert!(decelerate(v, amount).magnitude() <= v.magnitude() + EPSILON);
            }
        }
    }

    #[test]
    fn test_clamp_speed() {
        let v = clamp_speed(Vec2::new(30.0, 40.0), Some(5.0));
        assert!((v.x - 3.0).abs() < EPSILON);
        assert!((v.y - 4.0).abs() < EPSILON);
        assert_eq!(clamp_speed(Vec2::new(1.0, 0.0), Some(5.0)), Vec2::new(1.0, 0.0));
        assert_eq!(clamp_speed(Vec2::new(30.0, 40.0), None), Vec2::new(30.0, 40.0));
        assert_eq!(clamp_speed(Vec2::new(30.0, 40.0), Some(-1.0)), Vec2::new(30.0, 40.0));
    }

    #[test]
    fn test_clamp_speed_is_idempotent() {
        let once = clamp_speed(Vec2::new(-7.0, 24.0), Some(4.0));
        let twice = clamp_speed(once, Some(4.0));
        assert!((once.x - twice.x).abs() < EPSILON);
        assert!((once.y - twice.y).abs() < EPSILON);
    }

    #[test]
    fn test_unclamped_channel_keeps_speed() {
        let config = config();
        let mut body = Body {
            push_velocity: Vec2::new(100.0, 0.0),
            motion: MotionConfig { push_max_speed: None, push_deceleration: 0.0, ..MotionConfig::default() },
            ..Body::default()
        };
        integrate(&mut body, config.baseline_timestep_ms, &config);
        assert_eq!(body.push_velocity, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_moving_actor_does_not_decelerate() {
        let config = config();
        let mut body = Body::actor(0, 0, 32.0);
        if let Some(actor) = body.as_actor_mut() {
            actor.intent = Some(Intent::of(ActionKind::Move, Vec2::new(1.0, 0.0)));
        }
        body.run_controller(config.baseline_timestep_ms, &config);
        let speed = body.move_speed();
        integrate(&mut body, config.baseline_timestep_ms, &config);
        assert!((body.move_speed() - speed).abs() < EPSILON);
    }
}
