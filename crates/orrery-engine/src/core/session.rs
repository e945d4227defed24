//! One mounted view of one star system.
//!
//! The session owns all per-frame mutable state (phases, camera, selection,
//! queued input) and is passed explicitly to every tick. It knows nothing
//! about surfaces or frame scheduling; that is the lifecycle manager's job.

use glam::{Vec2, Vec3};

use crate::api::config::OrreryConfig;
use crate::api::types::{DetailRecord, EntityId, OrreryEvent, SoundEvent};
use crate::assets::catalog::StarSystem;
use crate::assets::registry::DetailCatalog;
use crate::components::entity::{BodyKind, Entity};
use crate::components::mesh::{MeshComponent, SDFColor};
use crate::core::animator::{orbit_point, OrbitalAnimator};
use crate::core::scene::Scene;
use crate::core::time::TickClock;
use crate::input::pointer::PointerGesture;
use crate::input::queue::{InputEvent, InputQueue, PointerButton};
use crate::layout::{Layout, LayoutEntry};
use crate::renderer::camera::{OrbitCamera, Projection};
use crate::renderer::traits::FrameData;
use crate::systems::picking::{pick, PickTarget};
use crate::systems::render::FrameBuilder;

pub struct OrrerySession {
    config: OrreryConfig,
    system_name: String,
    layout: Layout,
    animator: OrbitalAnimator,
    clock: TickClock,
    scene: Scene,
    camera: OrbitCamera,
    input: InputQueue,
    gesture: PointerGesture,
    selection: Option<usize>,
    events: Vec<OrreryEvent>,
    sounds: Vec<SoundEvent>,
    builder: FrameBuilder,
    frame: FrameData,
}

impl OrrerySession {
    /// Lay out `system` for a viewport of `viewport` pixels.
    pub fn new(
        system: &StarSystem,
        details: &DetailCatalog,
        config: OrreryConfig,
        viewport: Vec2,
    ) -> Self {
        let budget = config.layout.budget.resolve(viewport.x, viewport.y);
        let layout = Layout::build(system, details, &config.layout, &config.animation, budget);
        let animator = OrbitalAnimator::new(
            layout.entries().iter().map(|e| e.period),
            config.animation.base_angular_rate,
        );
        let camera = OrbitCamera::new(&config.camera, viewport.x, viewport.y);

        let mut scene = Scene::with_capacity(layout.len() + 1);
        let star = &config.star;
        scene.spawn(
            Entity::new(EntityId(0), BodyKind::Star)
                .with_tag(system.name.clone())
                .with_mesh(
                    MeshComponent::sphere(star.radius, SDFColor::from_array(star.color))
                        .with_emissive(star.emissive),
                ),
        );
        for (index, entry) in layout.entries().iter().enumerate() {
            scene.spawn(
                Entity::new(EntityId(index as u32 + 1), BodyKind::Planet { entry: index })
                    .with_tag(entry.name.clone())
                    .with_pos(orbit_point(entry.orbit_radius, entry.placement as f64))
                    .with_mesh(MeshComponent::sphere(entry.world_radius, entry.color)),
            );
        }

        log::info!(
            "{}: {} of {} bodies placed, budget {budget}",
            system.name,
            layout.len(),
            system.bodies.len()
        );

        let mut session = Self {
            clock: TickClock::new(config.animation.tick_mode),
            config,
            system_name: system.name.clone(),
            layout,
            animator,
            scene,
            camera,
            input: InputQueue::new(),
            gesture: PointerGesture::default(),
            selection: None,
            events: Vec::new(),
            sounds: Vec::new(),
            builder: FrameBuilder::new(),
            frame: FrameData::default(),
        };
        session.rebuild_frame();
        session
    }

    /// Queue an input event for the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Apply queued input, advance animation by one host frame of `dt`
    /// seconds, and rebuild the frame. Returns the number of animation ticks
    /// applied.
    pub fn tick(&mut self, dt: f32) -> u32 {
        for event in self.input.drain() {
            self.apply(event);
        }

        self.camera.update(dt);

        let ticks = if self.animator.is_paused() {
            0
        } else {
            self.clock.advance(dt)
        };
        self.animator.step(ticks);
        self.update_positions();
        self.rebuild_frame();
        ticks
    }

    fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Resize { width, height } => self.camera.resize(width, height),
            InputEvent::PointerDown { x, y, button } => self.gesture.press(Vec2::new(x, y), button),
            InputEvent::PointerMove { x, y } => {
                if let Some(drag) = self.gesture.move_to(Vec2::new(x, y)) {
                    match drag.button {
                        PointerButton::Primary => self.camera.orbit(drag.delta),
                        PointerButton::Secondary => self.camera.pan(drag.delta),
                    }
                }
            }
            InputEvent::PointerUp { x, y } => {
                if let Some(click) = self.gesture.release(Vec2::new(x, y)) {
                    self.select_at(click);
                }
            }
            InputEvent::PointerCancel => self.gesture.cancel(),
            InputEvent::Wheel { delta } => self.camera.zoom(delta),
            InputEvent::SetPaused(paused) => self.set_paused(paused),
            InputEvent::SetSpeed(speed) => self.animator.set_speed(speed as f64),
            InputEvent::ResetView => self.camera.reset(),
            InputEvent::ClearSelection => self.clear_selection(),
            InputEvent::Close => self.close(),
        }
    }

    fn update_positions(&mut self) {
        for (index, entry) in self.layout.entries().iter().enumerate() {
            let phase = self.animator.phase(index).unwrap_or(0.0);
            let angle = entry.placement as f64 + phase;
            self.scene.set_planet_pos(index, orbit_point(entry.orbit_radius, angle));
        }
    }

    fn rebuild_frame(&mut self) {
        self.builder.build(
            &self.scene,
            &self.layout,
            &self.camera,
            &self.config.guides,
            self.selection,
            &mut self.frame,
        );
        self.frame.tick = self.animator.ticks();
    }

    /// Resolve a click at viewport pixel `screen`. Selects the nearest body
    /// under the pointer or clears the selection when nothing is hit.
    pub fn select_at(&mut self, screen: Vec2) -> Option<&DetailRecord> {
        match pick(&self.camera, screen, self.pick_targets()) {
            Some(entry) => {
                self.selection = Some(entry);
                let record = self.layout.get(entry)?.record.clone();
                log::debug!("{}: selected '{}'", self.system_name, record.name);
                self.events.push(OrreryEvent::Selected(record));
                self.sounds.push(SoundEvent::SELECT);
                self.layout.get(entry).map(|e| &e.record)
            }
            None => {
                self.clear_selection();
                None
            }
        }
    }

    /// Drop the selection. No event is emitted when nothing was selected.
    pub fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            self.events.push(OrreryEvent::SelectionCleared);
        }
    }

    /// Ask the collaborator to leave the view.
    pub fn close(&mut self) {
        self.clear_selection();
        self.events.push(OrreryEvent::CloseRequested);
        self.sounds.push(SoundEvent::EXIT);
    }

    pub fn set_paused(&mut self, paused: bool) {
        if !paused && self.animator.is_paused() {
            self.clock.reset();
        }
        self.animator.set_paused(paused);
    }

    /// Current pickable spheres: placed bodies only, never the star.
    pub fn pick_targets(&self) -> Vec<PickTarget> {
        self.scene
            .planets()
            .filter_map(|e| {
                let entry = e.entry()?;
                let mesh = e.mesh.as_ref()?;
                Some(PickTarget {
                    entry,
                    center: e.pos,
                    radius: mesh.shape.bounding_radius(),
                })
            })
            .collect()
    }

    /// World position of layout entry `entry`.
    pub fn world_position(&self, entry: usize) -> Option<Vec3> {
        self.scene.planet(entry).map(|e| e.pos)
    }

    pub fn project(&self, world: Vec3) -> Option<Projection> {
        self.camera.project(world)
    }

    /// Screen position of layout entry `entry`.
    pub fn screen_position(&self, entry: usize) -> Option<Vec2> {
        self.project(self.world_position(entry)?).map(|p| p.screen)
    }

    pub fn drain_events(&mut self) -> Vec<OrreryEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn drain_sounds(&mut self) -> Vec<SoundEvent> {
        std::mem::take(&mut self.sounds)
    }

    pub fn selection(&self) -> Option<&LayoutEntry> {
        self.layout.get(self.selection?)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selection
    }

    pub fn system_name(&self) -> &str {
        &self.system_name
    }

    pub fn config(&self) -> &OrreryConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn animator(&self) -> &OrbitalAnimator {
        &self.animator
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn frame(&self) -> &FrameData {
        &self.frame
    }
}
