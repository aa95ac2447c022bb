pub mod circle;
pub mod line_segment;
pub mod polygon;

pub use circle::CIRCLE_APPROXIMATION;
pub use line_segment::LineSegment;
pub use polygon::{edge_normals, PolygonPath};

use crate::math::vec2::Vec2;
use serde::{Deserialize, Serialize};

/// Physical outline of a body. The body's `size` gives circles their
/// diameter and squares their side length; polygons carry their own extent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Shape {
    /// No outline; never collides.
    None,
    #[default]
    Circle,
    /// Axis-aligned square centred on the anchor.
    Square,
    /// Path of offsets relative to the anchor.
    Polygon(PolygonPath),
}

impl Shape {
    pub fn is_circle(&self) -> bool {
        matches!(self, Shape::Circle)
    }

    /// Squares are polygons with four vertices as far as collision goes.
    pub fn is_polygonal(&self) -> bool {
        matches!(self, Shape::Square | Shape::Polygon(_))
    }

    /// Shapes that take part in collision. Polygons need at least three
    /// vertices to enclose anything.
    pub fn is_collidable(&self) -> bool {
        match self {
            Shape::None => false,
            Shape::Circle | Shape::Square => true,
            Shape::Polygon(path) => path.is_closed_shape(),
        }
    }

    /// World-space vertices for a body anchored at `position` with `size`.
    /// Circles come out as an eight-point approximation.
    pub fn vertices(&self, position: Vec2, size: f64) -> Vec<Vec2> {
        match self {
            Shape::None => Vec::new(),
            Shape::Circle => circle::approximate(position, size / 2.0),
            Shape::Square => {
                let half = size / 2.0;
                vec![
                    Vec2::new(position.x - half, position.y - half),
                    Vec2::new(position.x + half, position.y - half),
                    Vec2::new(position.x + half, position.y + half),
                    Vec2::new(position.x - half, position.y + half),
                ]
            }
            Shape::Polygon(path) => path.vertices(position),
        }
    }
}
