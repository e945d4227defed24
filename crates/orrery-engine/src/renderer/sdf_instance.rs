use bytemuck::{Pod, Zeroable};

/// Per-instance data for one projected sphere.
/// 12 floats = 48 bytes per instance, laid out for direct upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SDFInstance {
    /// Viewport pixels.
    pub x: f32,
    pub y: f32,
    /// Projected radius in pixels.
    pub radius: f32,
    /// View-space depth; larger is farther.
    pub depth: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub shininess: f32,
    pub emissive: f32,
    /// 1.0 for the selected body, 0.0 otherwise.
    pub highlight: f32,
    pub _pad0: f32,
    pub _pad1: f32,
}

impl SDFInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Depth-sorted sphere instances for one frame.
#[derive(Debug, Clone, Default)]
pub struct SDFBuffer {
    instances: Vec<SDFInstance>,
}

impl SDFBuffer {
    pub fn new() -> Self {
        Self::with_capacity(16)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: SDFInstance) {
        self.instances.push(instance);
    }

    /// Painter's order: farthest first.
    pub fn sort_back_to_front(&mut self) {
        self.instances
            .sort_by(|a, b| b.depth.partial_cmp(&a.depth).unwrap_or(std::cmp::Ordering::Equal));
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn as_slice(&self) -> &[SDFInstance] {
        &self.instances
    }

    /// Flat float view for hosts that upload raw buffers.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}
