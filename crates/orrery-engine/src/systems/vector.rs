//! Lyon-based stroke tessellation for orbit guides and the selection ring.
//!
//! Shapes are tessellated in screen space into a flat triangle list so any
//! presenter (WebGL, Canvas2D) can draw them without its own path logic.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::{Path, Winding};
use lyon::tessellation::{
    BuffersBuilder, StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor,
    VertexBuffers,
};

use crate::components::mesh::SDFColor;

/// Per-vertex data for vector rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// RGBA color for stroked shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorColor {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_sdf(color: SDFColor, a: f32) -> Self {
        Self::new(color.r, color.g, color.b, a)
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

struct StrokeVertexCtor {
    color: VectorColor,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        VectorVertex {
            x: vertex.position().x,
            y: vertex.position().y,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
        }
    }
}

/// Stroke tessellator plus the output triangle list.
/// Cleared each frame and refilled by drawing commands.
pub struct VectorState {
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    vertices: Vec<VectorVertex>,
}

impl VectorState {
    pub fn new() -> Self {
        Self {
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            vertices: Vec::with_capacity(4096),
        }
    }

    /// Clear the vertex buffer. Called at the start of each frame.
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Unindexed triangle list, three vertices per triangle.
    pub fn vertices(&self) -> &[VectorVertex] {
        &self.vertices
    }

    fn flush_geometry(&mut self) {
        let VertexBuffers { vertices, indices } = &mut self.geometry;
        self.vertices
            .extend(indices.iter().map(|&idx| vertices[idx as usize]));
        vertices.clear();
        indices.clear();
    }

    /// Stroke a run of screen points, joining the last point back to the
    /// first when `closed`. Runs too short to form a line are skipped.
    pub fn stroke_run(&mut self, points: &[Vec2], closed: bool, width: f32, color: VectorColor) {
        let min_len = if closed { 3 } else { 2 };
        if points.len() < min_len {
            return;
        }
        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(closed);
        self.stroke_path(&builder.build(), width, color);
    }

    /// Stroke a circle.
    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: VectorColor) {
        if radius <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, Winding::Positive);
        self.stroke_path(&builder.build(), width, color);
    }

    /// Tessellate an arbitrary stroked lyon Path.
    pub fn stroke_path(&mut self, path: &Path, width: f32, color: VectorColor) {
        if width <= 0.0 || color.a <= 0.0 {
            return;
        }
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(0.25).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );

        match result {
            Ok(()) => self.flush_geometry(),
            Err(err) => {
                log::debug!("stroke tessellation failed: {err:?}");
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_vertex_is_24_bytes() {
        assert_eq!(std::mem::size_of::<VectorVertex>(), 24);
        assert_eq!(VectorVertex::STRIDE_BYTES, 24);
    }

    #[test]
    fn closed_ring_produces_triangles() {
        let mut state = VectorState::new();
        let ring: Vec<Vec2> = (0..32)
            .map(|i| {
                let a = i as f32 / 32.0 * std::f32::consts::TAU;
                Vec2::new(100.0 + 50.0 * a.cos(), 100.0 + 50.0 * a.sin())
            })
            .collect();
        state.stroke_run(&ring, true, 1.0, VectorColor::WHITE.with_alpha(0.4));
        assert!(state.vertex_count() > 0);
        assert_eq!(state.vertex_count() % 3, 0);
        assert!(state.vertices().iter().all(|v| v.a == 0.4));
    }

    #[test]
    fn circle_then_open_run() {
        let mut state = VectorState::new();
        state.stroke_circle(Vec2::new(50.0, 50.0), 12.0, 2.0, VectorColor::WHITE);
        let after_circle = state.vertex_count();
        assert!(after_circle > 0);
        state.stroke_run(&[Vec2::ZERO, Vec2::new(10.0, 10.0)], false, 1.0, VectorColor::WHITE);
        assert!(state.vertex_count() > after_circle);
    }

    #[test]
    fn degenerate_input_produces_nothing() {
        let mut state = VectorState::new();
        state.stroke_run(&[Vec2::ZERO, Vec2::ONE], true, 1.0, VectorColor::WHITE);
        state.stroke_run(&[Vec2::ZERO], false, 1.0, VectorColor::WHITE);
        state.stroke_circle(Vec2::ZERO, 0.0, 1.0, VectorColor::WHITE);
        state.stroke_circle(Vec2::ZERO, 5.0, 1.0, VectorColor::WHITE.with_alpha(0.0));
        assert_eq!(state.vertex_count(), 0);
    }

    #[test]
    fn clear_empties_between_frames() {
        let mut state = VectorState::new();
        state.stroke_circle(Vec2::ZERO, 5.0, 1.0, VectorColor::WHITE);
        assert!(state.vertex_count() > 0);
        state.clear();
        assert_eq!(state.vertex_count(), 0);
    }
}
