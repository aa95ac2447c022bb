use serde::{Deserialize, Serialize};

use super::{Action, ActionKind, Intent, SkillPhase, MAX_CHARGING_POWER, MOVE_CYCLE};
use crate::common::config::PhysicsConfig;
use crate::math::vec2::Vec2;
use crate::objects::body::Body;
use crate::objects::effects::Vitals;

/// Phase deadlines are sums of tick-sized steps; this absorbs their rounding.
const PHASE_EPSILON: f64 = 1e-9;

/// Controller state for an intent-driven body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub intent: Option<Intent>,
    pub action: Action,
    pub vitals: Vitals,
}

impl Actor {
    pub fn new() -> Self {
        Actor::default()
    }

    pub fn go_idle(&mut self) {
        self.action = Action::idle();
    }

    /// Translates the current intent into an action.
    ///
    /// Idle and move can be replaced by any intent. `skill` is only accepted
    /// from `charging`, carrying the charge over as power. From any state an
    /// intent of the running action's name only updates its direction;
    /// anything else waits for the action to complete.
    pub fn process_intent(&mut self) {
        let Some(intent) = &self.intent else {
            if self.action.kind == ActionKind::Move {
                self.go_idle();
            }
            return;
        };

        let kind = match intent.name.parse::<ActionKind>() {
            Ok(kind) => kind,
            Err(err) => {
                if self.action.kind.is_cancelable() {
                    log::error!("{err}; going idle");
                    self.go_idle();
                }
                return;
            }
        };

        if kind == self.action.kind {
            self.action.direction = intent.direction;
            return;
        }

        if kind == ActionKind::Skill {
            if self.action.kind == ActionKind::Charging {
                log::debug!("skill released with power {:.1}", self.action.counter);
                self.action = Action::skill(intent.direction, self.action.counter);
            }
            return;
        }

        if self.action.kind.is_cancelable() {
            log::debug!("action {} -> {}", self.action.kind, kind);
            self.action = Action::new(kind, intent.direction);
        }
    }

    /// Advances the current action by `dt` ms, feeding its motion into `body`.
    pub fn process_action(&mut self, body: &mut Body, dt: f64, config: &PhysicsConfig) {
        let tick = config.baseline_timestep_ms;
        let action = &mut self.action;

        match action.kind {
            ActionKind::Idle => {}
            ActionKind::Move => {
                if action.direction.is_zero() {
                    return;
                }
                let acceleration = body.motion.move_acceleration * config.time_correction(dt);
                let heading = action.direction.angle();
                body.move_velocity += Vec2::from_polar(acceleration, heading);
                body.set_rotation(heading);
                action.counter = (action.counter + dt) % MOVE_CYCLE;
            }
            ActionKind::Charging => {
                action.counter = (action.counter + dt).min(MAX_CHARGING_POWER);
            }
            ActionKind::Skill | ActionKind::Dash => {
                let push_power = action.push_power(body.size);
                let phase = match action.phase {
                    Some(phase) => phase,
                    None => {
                        if !action.direction.is_zero() {
                            body.set_rotation(action.direction.angle());
                        }
                        action.heading = Some(body.rotation());
                        action.phase = Some(SkillPhase::Windup);
                        SkillPhase::Windup
                    }
                };

                match phase {
                    SkillPhase::Windup | SkillPhase::Winddown => {
                        action.counter += dt;
                    }
                    SkillPhase::Execution => {
                        let remaining = (phase.ticks() * tick - action.counter).max(0.0);
                        let step = dt.min(remaining);
                        if body.movable {
                            let heading = action.heading.unwrap_or(body.rotation());
                            body.push_velocity +=
                                Vec2::from_polar(push_power * step / tick, heading);
                        }
                        action.counter += step;
                    }
                }

                if action.counter >= phase.ticks() * tick - PHASE_EPSILON {
                    let next = match phase {
                        SkillPhase::Windup => Some(SkillPhase::Execution),
                        SkillPhase::Execution => Some(SkillPhase::Winddown),
                        SkillPhase::Winddown => None,
                    };
                    log::debug!("{} {:?} -> {:?}", action.kind, phase, next);
                    match next {
                        Some(next) => {
                            action.phase = Some(next);
                            action.counter = 0.0;
                        }
                        None => self.go_idle(),
                    }
                }
            }
        }
    }

    /// Move deceleration is suspended while the actor steers.
    pub fn move_deceleration(&self, base: f64) -> f64 {
        if self.action.kind == ActionKind::Move {
            0.0
        } else {
            base
        }
    }

    /// Push deceleration is suspended during a skill's execution phase.
    pub fn push_deceleration(&self, base: f64) -> f64 {
        if self.action.is_executing() {
            0.0
        } else {
            base
        }
    }
}
