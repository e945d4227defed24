use crate::components::entity::Entity;
use crate::renderer::camera::OrbitCamera;
use crate::renderer::sdf_instance::{SDFBuffer, SDFInstance};

/// Project every visible sphere and sort back to front.
///
/// `selected` is the layout index of the selected body, if any. Entities
/// behind the camera are dropped.
pub fn build_sdf_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    camera: &OrbitCamera,
    selected: Option<usize>,
    buffer: &mut SDFBuffer,
) {
    buffer.clear();
    for entity in entities {
        if !entity.active {
            continue;
        }
        let Some(mesh) = &entity.mesh else {
            continue;
        };
        let Some(proj) = camera.project(entity.pos) else {
            continue;
        };
        let highlight = match (entity.entry(), selected) {
            (Some(entry), Some(sel)) if entry == sel => 1.0,
            _ => 0.0,
        };
        buffer.push(SDFInstance {
            x: proj.screen.x,
            y: proj.screen.y,
            radius: mesh.shape.bounding_radius() * proj.scale,
            depth: proj.depth,
            r: mesh.color.r,
            g: mesh.color.g,
            b: mesh.color.b,
            shininess: mesh.shininess,
            emissive: mesh.emissive,
            highlight,
            _pad0: 0.0,
            _pad1: 0.0,
        });
    }
    buffer.sort_back_to_front();
}
