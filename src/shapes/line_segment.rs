use crate::math::vec2::Vec2;

/// A directed segment `start -> end`. Used both for line-of-sight rays and
/// for polygon edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Vec2,
    pub end: Vec2,
}

impl LineSegment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Segment of `length` starting at `origin` heading along `angle`.
    pub fn from_angle(origin: Vec2, angle: f64, length: f64) -> Self {
        Self::new(origin, origin + Vec2::from_polar(length, angle))
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Returns the direction vector of the segment (from start to end).
    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    /// Point at `fraction` of the way along the segment.
    pub fn point_at(&self, fraction: f64) -> Vec2 {
        self.start + self.direction() * fraction
    }

    /// Every edge of a closed vertex loop, last vertex wrapping to the first.
    pub fn edges(vertices: &[Vec2]) -> impl Iterator<Item = LineSegment> + '_ {
        let n = vertices.len();
        (0..n).map(move |i| LineSegment::new(vertices[i], vertices[(i + 1) % n]))
    }
}
