use serde::{Deserialize, Serialize};

use crate::math::vec2::Vec2;
use crate::objects::body::Body;
use crate::objects::BodyId;

/// What one side of a contact should do to stop overlapping.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BodyCorrection {
    /// Positional displacement to apply.
    pub delta: Vec2,
    /// Post-collision push velocity, when momentum was exchanged.
    pub push: Option<Vec2>,
}

/// Resolution of an overlap between bodies A and B.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Correction {
    pub a: BodyCorrection,
    pub b: BodyCorrection,
}

impl Correction {
    /// The same correction seen from B's side.
    pub fn swapped(self) -> Self {
        Correction { a: self.b, b: self.a }
    }
}

/// The other party in a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactTarget {
    Body(BodyId),
    Tile { col: i64, row: i64 },
}

/// Snapshot of the other party's flags, taken when the contact was found.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Counterpart {
    pub target: ContactTarget,
    pub solid: bool,
    pub movable: bool,
    pub circle: bool,
    pub polygonal: bool,
}

impl Counterpart {
    pub fn of(target: ContactTarget, body: &Body) -> Self {
        Counterpart {
            target,
            solid: body.solid,
            movable: body.movable,
            circle: body.shape.is_circle(),
            polygonal: body.shape.is_polygonal(),
        }
    }
}

/// How much of the penetration each side absorbs.
///
/// Non-solid contacts are reported but never pushed apart. Two movable
/// bodies split the distance; otherwise the movable one takes all of it.
pub fn correction_fractions(a: &Body, b: &Body) -> (f64, f64) {
    if !a.solid || !b.solid {
        return (0.0, 0.0);
    }
    match (a.movable, b.movable) {
        (true, true) => (0.5, 0.5),
        (true, false) => (1.0, 0.0),
        (false, true) => (0.0, 1.0),
        (false, false) => (0.0, 0.0),
    }
}
