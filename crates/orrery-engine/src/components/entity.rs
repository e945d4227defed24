use glam::Vec3;

use crate::api::types::EntityId;
use crate::components::mesh::MeshComponent;

/// What an entity stands for in the orrery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// The host star at the origin.
    Star,
    /// A placed body; `entry` indexes the session layout.
    Planet { entry: usize },
}

/// Fat Entity: a single struct with optional components.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// Display name, used for lookups by name.
    pub tag: String,
    /// Inactive entities are neither drawn nor picked.
    pub active: bool,
    pub kind: BodyKind,
    /// Position in world space.
    pub pos: Vec3,
    /// Sphere mesh (entities without one are invisible).
    pub mesh: Option<MeshComponent>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId, kind: BodyKind) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            kind,
            pos: Vec3::ZERO,
            mesh: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Layout index for planets, `None` for the star.
    pub fn entry(&self) -> Option<usize> {
        match self.kind {
            BodyKind::Planet { entry } => Some(entry),
            BodyKind::Star => None,
        }
    }
}
