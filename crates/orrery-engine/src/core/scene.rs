use glam::Vec3;

use crate::api::types::EntityId;
use crate::components::entity::{BodyKind, Entity};

/// Simple entity storage using a flat Vec.
/// A star system holds a handful of bodies, so linear scans are fine.
///
/// Planets are spawned in layout order, so planet `entry` lives at
/// `planet_offset + entry`.
pub struct Scene {
    entities: Vec<Entity>,
    planet_offset: usize,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(16)
    }

    /// Create a scene with a specific entity capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
            planet_offset: 0,
        }
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) {
        if matches!(entity.kind, BodyKind::Star) {
            self.planet_offset = self.entities.len() + 1;
        }
        self.entities.push(entity);
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    pub fn star(&self) -> Option<&Entity> {
        self.entities.iter().find(|e| e.kind == BodyKind::Star)
    }

    /// The entity for layout entry `entry`.
    pub fn planet(&self, entry: usize) -> Option<&Entity> {
        self.entities
            .get(self.planet_offset + entry)
            .filter(|e| e.entry() == Some(entry))
    }

    /// Move planet `entry` to `pos`.
    pub fn set_planet_pos(&mut self, entry: usize, pos: Vec3) {
        if let Some(e) = self.entities.get_mut(self.planet_offset + entry) {
            if e.entry() == Some(entry) {
                e.pos = pos;
            }
        }
    }

    /// Iterate over active planets.
    pub fn planets(&self) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(|e| e.active && e.entry().is_some())
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Clear all entities.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.planet_offset = 0;
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
