use std::f64::consts::TAU;

use glam::Vec2;

use crate::api::config::GuideConfig;
use crate::core::animator::orbit_point;
use crate::core::scene::Scene;
use crate::layout::Layout;
use crate::renderer::camera::OrbitCamera;
use crate::renderer::sdf_instance::SDFBuffer;
use crate::renderer::traits::{FrameData, SelectionMarker};
use crate::systems::sdf_render::build_sdf_buffer;
#[cfg(feature = "vectors")]
use crate::systems::vector::{VectorColor, VectorState};

/// Extra pixels between a selected body's limb and its ring.
const SELECTION_RING_GAP: f32 = 6.0;
const SELECTION_RING_WIDTH: f32 = 1.5;
const SELECTION_RING_ALPHA: f32 = 0.9;

/// Reusable scratch state for building [`FrameData`].
#[derive(Default)]
pub struct FrameBuilder {
    spheres: SDFBuffer,
    #[cfg(feature = "vectors")]
    vectors: VectorState,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill `frame` from the current scene and camera.
    pub fn build(
        &mut self,
        scene: &Scene,
        layout: &Layout,
        camera: &OrbitCamera,
        guides: &GuideConfig,
        selected: Option<usize>,
        frame: &mut FrameData,
    ) {
        frame.viewport = camera.viewport();

        build_sdf_buffer(scene.iter(), camera, selected, &mut self.spheres);
        frame.spheres.clear();
        frame.spheres.extend_from_slice(self.spheres.as_slice());

        frame.selection = selected.and_then(|entry| {
            let body = layout.get(entry)?;
            let planet = scene.planet(entry)?;
            let proj = camera.project(planet.pos)?;
            Some(SelectionMarker {
                name: body.name.clone(),
                center: proj.screen,
                radius: body.world_radius * proj.scale + SELECTION_RING_GAP,
            })
        });

        #[cfg(feature = "vectors")]
        {
            self.vectors.clear();
            for entry in layout.entries() {
                let color = VectorColor::from_sdf(entry.color, guides.alpha);
                for (points, closed) in guide_runs(camera, entry.orbit_radius, guides.samples) {
                    self.vectors.stroke_run(&points, closed, guides.width, color);
                }
            }
            if let Some(marker) = &frame.selection {
                self.vectors.stroke_circle(
                    marker.center,
                    marker.radius,
                    SELECTION_RING_WIDTH,
                    VectorColor::WHITE.with_alpha(SELECTION_RING_ALPHA),
                );
            }
            frame.vector_vertices.clear();
            frame.vector_vertices.extend_from_slice(self.vectors.vertices());
        }
        #[cfg(not(feature = "vectors"))]
        let _ = guides;
    }
}

/// Screen-space runs of an orbit ring. A fully visible ring is one closed
/// run; parts behind the camera split it into open runs.
pub fn guide_runs(camera: &OrbitCamera, radius: f32, samples: usize) -> Vec<(Vec<Vec2>, bool)> {
    let samples = samples.max(8);
    let projected: Vec<Option<Vec2>> = (0..samples)
        .map(|k| {
            let angle = k as f64 / samples as f64 * TAU;
            camera.project(orbit_point(radius, angle)).map(|p| p.screen)
        })
        .collect();

    if projected.iter().all(Option::is_some) {
        return vec![(projected.into_iter().flatten().collect(), true)];
    }

    let mut runs: Vec<Vec<Vec2>> = Vec::new();
    let mut current: Vec<Vec2> = Vec::new();
    for p in &projected {
        match p {
            Some(p) => current.push(*p),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        // the ring wraps: join the tail run onto the head run
        if projected[0].is_some() && !runs.is_empty() {
            current.extend_from_slice(&runs[0]);
            runs[0] = current;
        } else {
            runs.push(current);
        }
    }
    runs.into_iter()
        .filter(|r| r.len() >= 2)
        .map(|r| (r, false))
        .collect()
}
