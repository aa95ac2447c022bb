//! Intents, actions and the per-actor state machine that turns one into the other.

pub mod actor;

pub use actor::Actor;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::error::ActionError;
use crate::math::vec2::Vec2;

/// The move action's counter wraps at this many milliseconds (one walk cycle).
pub const MOVE_CYCLE: f64 = 500.0;
/// Charging saturates here; a released skill scales its impulse by `power / MAX_CHARGING_POWER`.
pub const MAX_CHARGING_POWER: f64 = 1000.0;

pub const WINDUP_TICKS: f64 = 5.0;
pub const EXECUTION_TICKS: f64 = 2.0;
pub const WINDDOWN_TICKS: f64 = 10.0;

/// Impulse per execution tick, as a fraction of body size.
pub const SKILL_PUSH_FACTOR: f64 = 0.5;
pub const DASH_PUSH_FACTOR: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Idle,
    Move,
    Charging,
    Skill,
    Dash,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Idle => "idle",
            ActionKind::Move => "move",
            ActionKind::Charging => "charging",
            ActionKind::Skill => "skill",
            ActionKind::Dash => "dash",
        }
    }

    /// Only idle and move may be interrupted by a new intent.
    pub fn is_cancelable(self) -> bool {
        matches!(self, ActionKind::Idle | ActionKind::Move)
    }

    /// Actions that run the windup/execution/winddown sequence.
    pub fn is_phased(self) -> bool {
        matches!(self, ActionKind::Skill | ActionKind::Dash)
    }
}

impl FromStr for ActionKind {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(ActionKind::Idle),
            "move" => Ok(ActionKind::Move),
            "charging" => Ok(ActionKind::Charging),
            "skill" => Ok(ActionKind::Skill),
            "dash" => Ok(ActionKind::Dash),
            other => Err(ActionError::UnknownAction(other.to_string())),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillPhase {
    Windup,
    Execution,
    Winddown,
}

impl SkillPhase {
    /// Phase length in baseline ticks.
    pub fn ticks(self) -> f64 {
        match self {
            SkillPhase::Windup => WINDUP_TICKS,
            SkillPhase::Execution => EXECUTION_TICKS,
            SkillPhase::Winddown => WINDDOWN_TICKS,
        }
    }
}

/// What an external controller wants the actor to do this tick.
///
/// The name stays a string so that unknown requests can be reported rather
/// than rejected at the input boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub direction: Vec2,
}

impl Intent {
    pub fn new(name: impl Into<String>, direction: Vec2) -> Self {
        Intent { name: name.into(), direction }
    }

    pub fn of(kind: ActionKind, direction: Vec2) -> Self {
        Intent::new(kind.as_str(), direction)
    }
}

/// The action an actor is currently performing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    /// Milliseconds spent in the current action, or current phase for phased actions.
    pub counter: f64,
    pub phase: Option<SkillPhase>,
    pub direction: Vec2,
    /// Heading locked in when the windup starts.
    pub heading: Option<f64>,
    /// Charge carried over from `charging` into `skill`.
    pub power: f64,
}

impl Default for Action {
    fn default() -> Self {
        Action::idle()
    }
}

impl Action {
    pub fn new(kind: ActionKind, direction: Vec2) -> Self {
        Action { kind, counter: 0.0, phase: None, direction, heading: None, power: 0.0 }
    }

    pub fn idle() -> Self {
        Action::new(ActionKind::Idle, Vec2::ZERO)
    }

    /// A skill released from a charge of `power` milliseconds.
    pub fn skill(direction: Vec2, power: f64) -> Self {
        Action { power, ..Action::new(ActionKind::Skill, direction) }
    }

    pub fn is_executing(&self) -> bool {
        self.kind.is_phased() && self.phase == Some(SkillPhase::Execution)
    }

    /// Impulse per baseline tick during execution for a body of `size`.
    pub fn push_power(&self, size: f64) -> f64 {
        match self.kind {
            ActionKind::Skill => size * SKILL_PUSH_FACTOR * (self.power / MAX_CHARGING_POWER),
            ActionKind::Dash => size * DASH_PUSH_FACTOR,
            _ => 0.0,
        }
    }
}
