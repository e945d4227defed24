/// RGB color for SDF sphere rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SDFColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl SDFColor {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn from_array(rgb: [f32; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

impl Default for SDFColor {
    fn default() -> Self {
        Self::WHITE
    }
}

/// SDF shape primitive. Sizes are in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SDFShape {
    Sphere { radius: f32 },
}

impl SDFShape {
    /// Radius of the bounding sphere, used for picking.
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            SDFShape::Sphere { radius } => radius,
        }
    }
}

/// Renderable sphere attached to a star or planet entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub shape: SDFShape,
    pub color: SDFColor,
    /// Phong specular exponent.
    pub shininess: f32,
    /// Glow multiplier; the star uses this, planets leave it at 0.
    pub emissive: f32,
}

impl MeshComponent {
    pub fn sphere(radius: f32, color: SDFColor) -> Self {
        Self {
            shape: SDFShape::Sphere { radius },
            color,
            shininess: 16.0,
            emissive: 0.0,
        }
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }
}
