//! Narrow-phase overlap tests.
//!
//! Circles are tested as true circles against each other; everything that
//! involves a polygon goes through the separating axis theorem.

use super::correction::{correction_fractions, BodyCorrection, Correction};
use super::momentum::post_collision_push;
use crate::math::sign;
use crate::math::vec2::Vec2;
use crate::objects::body::Body;
use crate::shapes::{edge_normals, Shape};

/// Tests two bodies for overlap and returns how to separate them.
///
/// Returns `None` when they do not overlap, when either shape cannot
/// collide, or when both references point at the same body.
pub fn check_collision(a: &Body, b: &Body) -> Option<Correction> {
    if std::ptr::eq(a, b) || !a.shape.is_collidable() || !b.shape.is_collidable() {
        return None;
    }

    match (&a.shape, &b.shape) {
        (Shape::Circle, Shape::Circle) => check_circle_circle(a, b),
        (Shape::Circle, s) if s.is_polygonal() => check_circle_polygon(a, b),
        (s, Shape::Circle) if s.is_polygonal() => check_circle_polygon(b, a).map(Correction::swapped),
        (s, t) if s.is_polygonal() && t.is_polygonal() => check_polygon_polygon(a, b),
        _ => None,
    }
}

/// Checks for overlap between two circles.
pub fn check_circle_circle(a: &Body, b: &Body) -> Option<Correction> {
    let offset = b.position - a.position;
    let distance = offset.magnitude();
    let min_distance = a.radius() + b.radius();
    if distance >= min_distance {
        return None;
    }

    // Coincident centres resolve along east
    let direction = Vec2::from_polar(1.0, offset.angle());
    let depth = min_distance - distance;
    let (fraction_a, fraction_b) = correction_fractions(a, b);
    let push = post_collision_push(a, b);

    Some(Correction {
        a: BodyCorrection { delta: direction * (-depth * fraction_a), push: push.map(|(pa, _)| pa) },
        b: BodyCorrection { delta: direction * (depth * fraction_b), push: push.map(|(_, pb)| pb) },
    })
}

/// Projects a vertex list onto `axis`, returning the (min, max) interval.
/// An empty list projects to an empty interval.
fn project(vertices: &[Vec2], axis: Vec2) -> (f64, f64) {
    vertices.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
        let p = v.dot(axis);
        (min.min(p), max.max(p))
    })
}

/// Minimum translation along `axes` that separates the two projections,
/// pointing from A's side towards B's side.
fn minimum_translation(
    axes: impl IntoIterator<Item = Vec2>,
    project_a: impl Fn(Vec2) -> (f64, f64),
    project_b: impl Fn(Vec2) -> (f64, f64),
) -> Option<Vec2> {
    let mut best: Option<(f64, Vec2)> = None;

    for axis in axes {
        let (min_a, max_a) = project_a(axis);
        let (min_b, max_b) = project_b(axis);
        let overlap = (max_a.min(max_b) - min_a.max(min_b)).max(0.0);

        if best.map_or(true, |(smallest, _)| overlap < smallest) {
            let side = sign((min_b + max_b) - (min_a + max_a));
            best = Some((overlap, axis * (overlap * side)));
        }
    }

    best.filter(|(overlap, _)| *overlap > 0.0).map(|(_, translation)| translation)
}

/// Builds the correction for a polygonal separation vector.
fn polygon_correction(a: &Body, b: &Body, translation: Vec2) -> Correction {
    let (fraction_a, fraction_b) = correction_fractions(a, b);
    Correction {
        a: BodyCorrection { delta: translation * -fraction_a, push: None },
        b: BodyCorrection { delta: translation * fraction_b, push: None },
    }
}

/// Checks for overlap between two polygonal bodies using SAT, testing the
/// edge normals of both.
pub fn check_polygon_polygon(a: &Body, b: &Body) -> Option<Correction> {
    let vertices_a = a.vertices();
    let vertices_b = b.vertices();
    let axes = edge_normals(&vertices_a).into_iter().chain(edge_normals(&vertices_b));

    minimum_translation(
        axes,
        |axis| project(&vertices_a, axis),
        |axis| project(&vertices_b, axis),
    )
    .map(|translation| polygon_correction(a, b, translation))
}

/// Checks for overlap between a circle (`a`) and a polygonal body (`b`).
///
/// The axis from the circle's centre to the polygon's anchor is tested
/// first, then the polygon's edge normals.
pub fn check_circle_polygon(circle: &Body, polygon: &Body) -> Option<Correction> {
    let radius = circle.radius();
    let vertices = polygon.vertices();
    let centre_axis = (polygon.position - circle.position).normalize();
    let axes = std::iter::once(centre_axis).chain(edge_normals(&vertices));

    minimum_translation(
        axes,
        |axis| {
            let centre = circle.position.dot(axis);
            (centre - radius, centre + radius)
        },
        |axis| project(&vertices, axis),
    )
    .map(|translation| polygon_correction(circle, polygon, translation))
}
