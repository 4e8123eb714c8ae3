//! Vertex generation for the game's line-art shapes
//!
//! Every shape is built in unit-box coordinates and scaled by the draw
//! transform, except batches of points which are already in world space.

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::sim::asteroid::silhouette;
use crate::sim::ship::{FLAME, HULL};

/// Ship hull as a line strip, optionally with the exhaust flame appended
pub fn ship(flame: bool) -> Vec<Vertex> {
    let mut vertices: Vec<Vertex> = HULL.iter().map(|p| Vertex::at(*p, colors::SHIP)).collect();
    if flame {
        vertices.extend(FLAME.iter().map(|p| Vertex::at(*p, colors::FLAME)));
    }
    vertices
}

/// Closed outline for an asteroid, regenerated from its seed
pub fn asteroid(seed: u32) -> Vec<Vertex> {
    outline(&silhouette(seed), colors::ASTEROID)
}

/// Vertices for a polygon outline
pub fn outline(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    points.iter().map(|p| Vertex::at(*p, color)).collect()
}

/// World-space point batch
pub fn points(positions: impl IntoIterator<Item = Vec2>, color: [f32; 4]) -> Vec<Vertex> {
    positions
        .into_iter()
        .map(|p| Vertex::at(p, color))
        .collect()
}

/// World-space line list, two vertices per segment
pub fn segments(pairs: &[(Vec2, Vec2)], color: [f32; 4]) -> Vec<Vertex> {
    pairs
        .iter()
        .flat_map(|(a, b)| [Vertex::at(*a, color), Vertex::at(*b, color)])
        .collect()
}
