//! Ray/segment intersection for line-of-sight queries.

use serde::{Deserialize, Serialize};

use crate::math::is_zero;
use crate::math::vec2::Vec2;
use crate::shapes::LineSegment;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    pub point: Vec2,
    /// How far along the ray the hit lies, in [0, 1].
    pub fraction: f64,
}

/// Intersects a ray (as a finite segment) with a segment.
///
/// Parallel or degenerate pairs never intersect. Both ends are inclusive.
pub fn intersect(ray: &LineSegment, segment: &LineSegment) -> Option<RayHit> {
    let r_origin = ray.start;
    let r_dir = ray.direction();
    let s_origin = segment.start;
    let s_dir = segment.direction();

    let det = s_dir.x * r_dir.y - s_dir.y * r_dir.x;
    if is_zero(det) {
        return None;
    }

    let s_fraction = (r_dir.x * (s_origin.y - r_origin.y) + r_dir.y * (r_origin.x - s_origin.x)) / det;
    let r_fraction = if !is_zero(r_dir.x) {
        (s_origin.x + s_dir.x * s_fraction - r_origin.x) / r_dir.x
    } else if !is_zero(r_dir.y) {
        (s_origin.y + s_dir.y * s_fraction - r_origin.y) / r_dir.y
    } else {
        return None;
    };

    if (0.0..=1.0).contains(&s_fraction) && (0.0..=1.0).contains(&r_fraction) {
        Some(RayHit { point: ray.point_at(r_fraction), fraction: r_fraction })
    } else {
        None
    }
}

/// Nearest hit of `ray` against every edge of a closed vertex loop.
pub fn intersect_outline(ray: &LineSegment, vertices: &[Vec2]) -> Option<RayHit> {
    if vertices.len() < 2 {
        return None;
    }
    LineSegment::edges(vertices)
        .filter_map(|edge| intersect(ray, &edge))
        .min_by(|a, b| a.fraction.total_cmp(&b.fraction))
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_perpendicular_crossing() {
        let ray = LineSegment::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        let wall = LineSegment::new(Vec2::new(5.0, -5.0), Vec2::new(5.0, 5.0));
        let hit = intersect(&ray, &wall).unwrap();
        assert!((hit.point.x - 5.0).abs() < EPSILON);
        assert!(hit.point.y.abs() < EPSILON);
        assert!((hit.fraction - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_parallel_never_intersects() {
        let ray = LineSegment::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        let wall = LineSegment::new(Vec2::new(0.0, 1.0), Vec2::new(10.0, 1.0));
        assert!(intersect(&ray, &wall).is_none());
        // Collinear counts as parallel too
        let wall = LineSegment::new(Vec2::new(2.0, 0.0), Vec2::new(8.0, 0.0));
        assert!(intersect(&ray, &wall).is_none());
    }

    #[test]
    fn test_out_of_range() {
        let ray = LineSegment::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        // Beyond the end of the ray
        let wall = LineSegment::new(Vec2::new(15.0, -5.0), Vec2::new(15.0, 5.0));
        assert!(intersect(&ray, &wall).is_none());
        // Segment does not reach the ray
        let wall = LineSegment::new(Vec2::new(5.0, 1.0), Vec2::new(5.0, 5.0));
        assert!(intersect(&ray, &wall).is_none());
    }

    #[test]
    fn test_vertical_ray() {
        let ray = LineSegment::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 8.0));
        let wall = LineSegment::new(Vec2::new(-1.0, 2.0), Vec2::new(1.0, 2.0));
        let hit = intersect(&ray, &wall).unwrap();
        assert!((hit.fraction - 0.25).abs() < EPSILON);
    }

    #[test]
    fn test_degenerate_ray() {
        let ray = LineSegment::new(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0));
        let wall = LineSegment::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0));
        assert!(intersect(&ray, &wall).is_none());
    }

    #[test]
    fn test_outline_returns_nearest_edge() {
        let ray = LineSegment::new(Vec2::new(0.0, 5.0), Vec2::new(20.0, 5.0));
        let square = [
            Vec2::new(10.0, 0.0),
            Vec2::new(14.0, 0.0),
            Vec2::new(14.0, 10.0),
            Vec2::new(10.0, 10.0),
        ];
        let hit = intersect_outline(&ray, &square).unwrap();
        assert!((hit.point.x - 10.0).abs() < EPSILON);
        assert!((hit.fraction - 0.5).abs() < EPSILON);
        assert!(intersect_outline(&ray, &square[..1]).is_none());
    }
}
