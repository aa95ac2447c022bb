use crate::common::error::ShapeError;
use crate::math::vec2::Vec2;
use serde::{Deserialize, Serialize};

/// Outline of a polygon as offsets from the owning body's anchor.
/// The path is closed implicitly: the last vertex connects back to the first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PolygonPath {
    offsets: Vec<Vec2>,
}

impl PolygonPath {
    pub fn new(offsets: Vec<Vec2>) -> Self {
        PolygonPath { offsets }
    }

    /// Builds a path from flat `[dx0, dy0, dx1, dy1, ...]` coordinates.
    pub fn from_flat(coords: &[f64]) -> Result<Self, ShapeError> {
        if coords.len() % 2 != 0 {
            return Err(ShapeError::OddPolygonPath(coords.len()));
        }
        let offsets = coords
            .chunks_exact(2)
            .map(|pair| Vec2::new(pair[0], pair[1]))
            .collect();
        Ok(PolygonPath { offsets })
    }

    pub fn offsets(&self) -> &[Vec2] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Fewer than three points can't enclose anything.
    pub fn is_closed_shape(&self) -> bool {
        self.offsets.len() >= 3
    }

    /// World-space vertices when anchored at `origin`.
    pub fn vertices(&self, origin: Vec2) -> Vec<Vec2> {
        self.offsets.iter().map(|&offset| origin + offset).collect()
    }
}

/// Unit normals of each edge `v[i] -> v[i+1]` (wrapping), as `(-dy, dx) / len`.
///
/// A zero-length edge yields a zero vector. Fewer than two vertices yields no
/// normals, which leaves the shape collision-inert.
pub fn edge_normals(vertices: &[Vec2]) -> Vec<Vec2> {
    let n = vertices.len();
    if n < 2 {
        return Vec::new();
    }

    let mut normals = Vec::with_capacity(n);
    for i in 0..n {
        let edge = vertices[(i + 1) % n] - vertices[i];
        let length = edge.magnitude();
        if length == 0.0 {
            normals.push(Vec2::ZERO);
        } else {
            normals.push(edge.perpendicular() / length);
        }
    }
    normals
}
