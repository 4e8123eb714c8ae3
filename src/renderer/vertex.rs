//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    #[inline]
    pub fn at(p: Vec2, color: [f32; 4]) -> Self {
        Self::new(p.x, p.y, color)
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }

    /// Raw bytes for a vertex buffer upload
    pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }

    /// Byte stride between consecutive vertices
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Colors for game elements
pub mod colors {
    pub const SHIP: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const FLAME: [f32; 4] = [1.0, 0.6, 0.2, 1.0];
    pub const ASTEROID: [f32; 4] = [0.85, 0.85, 0.9, 1.0];
    pub const BULLET: [f32; 4] = [1.0, 1.0, 0.8, 1.0];
    pub const DEBRIS: [f32; 4] = [0.9, 0.9, 0.9, 1.0];
    pub const PARTICLE: [f32; 4] = [1.0, 0.8, 0.5, 1.0];
    pub const HUD: [f32; 4] = [0.7, 0.7, 0.7, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}
