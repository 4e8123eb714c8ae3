//! Rendering contract
//!
//! The simulation never talks to a graphics API. [`scene::render`] turns a
//! [`GameState`](crate::sim::GameState) into [`DrawCommand`]s, and a backend
//! implements [`Canvas`] to rasterise them with the supplied transform and an
//! orthographic [`projection`] over the world rectangle.

pub mod scene;
pub mod shapes;
pub mod vertex;

pub use scene::render;
pub use vertex::{Vertex, colors};

use glam::{Mat4, Vec2, Vec3};

/// How a command's vertices are assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Points,
    /// Independent segments, two vertices each
    Lines,
    LineStrip,
    /// Strip closed back to the first vertex
    LineLoop,
}

/// One draw: unit-box vertices placed by position, extent and rotation
#[derive(Debug, Clone, Copy)]
pub struct DrawCommand<'a> {
    pub primitive: Primitive,
    pub position: Vec2,
    /// Scale per axis (the object's bounding box)
    pub extent: Vec2,
    /// Radians about +z
    pub rotation: f32,
    pub vertices: &'a [Vertex],
}

impl<'a> DrawCommand<'a> {
    /// Command whose vertices are already in world space
    pub fn world(primitive: Primitive, vertices: &'a [Vertex]) -> Self {
        Self {
            primitive,
            position: Vec2::ZERO,
            extent: Vec2::ONE,
            rotation: 0.0,
            vertices,
        }
    }

    /// Model matrix: translate, then rotate, then scale
    pub fn transform(&self) -> Mat4 {
        Mat4::from_translation(self.position.extend(0.0))
            * Mat4::from_rotation_z(self.rotation)
            * Mat4::from_scale(Vec3::new(self.extent.x, self.extent.y, 1.0))
    }

    /// Same command moved to `position`
    pub fn at(&self, position: Vec2) -> Self {
        Self { position, ..*self }
    }
}

/// Drawing backend
pub trait Canvas {
    fn draw(&mut self, cmd: &DrawCommand<'_>);
}

/// Orthographic projection mapping the world rectangle to clip space, y down
pub fn projection(width: f32, height: f32) -> Mat4 {
    Mat4::orthographic_rh_gl(0.0, width, height, 0.0, -1.0, 1.0)
}

/// Owned copy of a [`DrawCommand`]
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub primitive: Primitive,
    pub position: Vec2,
    pub extent: Vec2,
    pub rotation: f32,
    pub vertices: Vec<Vertex>,
}

/// Canvas that keeps every command; used headless and in tests
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub records: Vec<DrawRecord>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn count(&self, primitive: Primitive) -> usize {
        self.records
            .iter()
            .filter(|r| r.primitive == primitive)
            .count()
    }

    pub fn vertex_count(&self) -> usize {
        self.records.iter().map(|r| r.vertices.len()).sum()
    }
}

impl Canvas for RecordingCanvas {
    fn draw(&mut self, cmd: &DrawCommand<'_>) {
        self.records.push(DrawRecord {
            primitive: cmd.primitive,
            position: cmd.position,
            extent: cmd.extent,
            rotation: cmd.rotation,
            vertices: cmd.vertices.to_vec(),
        });
    }
}
