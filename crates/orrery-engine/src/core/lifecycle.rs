//! Mount/unmount orchestration over a [`RenderHost`].
//!
//! At most one session, one surface, one set of listeners, and one pending
//! frame request exist at any time. Every teardown bumps the generation, so
//! host callbacks scheduled before it are recognized as stale and dropped.

use glam::Vec2;

use crate::api::config::OrreryConfig;
use crate::api::error::OrreryError;
use crate::api::types::{OrreryEvent, SoundEvent};
use crate::assets::catalog::StarSystem;
use crate::assets::registry::DetailCatalog;
use crate::core::session::OrrerySession;
use crate::input::queue::InputEvent;
use crate::renderer::traits::{FrameHandle, RenderHost};

struct Mounted<S> {
    session: OrrerySession,
    surface: S,
    size: Vec2,
    pending_frame: Option<FrameHandle>,
}

enum MountState<S> {
    Unmounted,
    /// The container was not measurable; retried on the next layout pass.
    Pending(StarSystem),
    Mounted(Box<Mounted<S>>),
}

/// Owns the host and at most one live [`OrrerySession`].
pub struct Orrery<H: RenderHost> {
    host: H,
    details: DetailCatalog,
    config: OrreryConfig,
    state: MountState<H::Surface>,
    generation: u64,
    /// Events and sounds produced with no live session to hold them.
    orphan_events: Vec<OrreryEvent>,
    orphan_sounds: Vec<SoundEvent>,
}

impl<H: RenderHost> Orrery<H> {
    pub fn new(host: H, details: DetailCatalog, config: OrreryConfig) -> Self {
        Self {
            host,
            details,
            config,
            state: MountState::Unmounted,
            generation: 0,
            orphan_events: Vec::new(),
            orphan_sounds: Vec::new(),
        }
    }

    /// Show `system`, replacing whatever is mounted.
    ///
    /// An unmeasurable container is not an error: the mount is parked and
    /// retried by [`Orrery::layout_pass`].
    pub fn mount(&mut self, system: StarSystem) -> Result<(), OrreryError> {
        self.teardown();
        match self.start(&system) {
            Ok(()) => Ok(()),
            Err(OrreryError::MountUnavailable) => {
                log::info!("{}: container not ready, mount deferred", system.name);
                self.state = MountState::Pending(system);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Full teardown of the current system, then mount `system`.
    pub fn switch_system(&mut self, system: StarSystem) -> Result<(), OrreryError> {
        self.mount(system)
    }

    pub fn unmount(&mut self) {
        if !matches!(self.state, MountState::Unmounted) {
            log::info!("{}: unmounted", self.host.backend());
        }
        self.teardown();
    }

    fn start(&mut self, system: &StarSystem) -> Result<(), OrreryError> {
        let size = self
            .host
            .container_size()
            .filter(|s| s.x > 0.0 && s.y > 0.0)
            .ok_or(OrreryError::MountUnavailable)?;
        let surface = self.host.create_surface(size)?;
        let session = OrrerySession::new(system, &self.details, self.config.clone(), size);

        self.host.attach_listeners(self.generation);
        let pending_frame = Some(self.host.request_frame(self.generation));
        self.state = MountState::Mounted(Box::new(Mounted {
            session,
            surface,
            size,
            pending_frame,
        }));
        log::info!(
            "{}: mounted '{}' at {}x{} (generation {})",
            self.host.backend(),
            system.name,
            size.x,
            size.y,
            self.generation
        );
        Ok(())
    }

    fn teardown(&mut self) {
        let state = std::mem::replace(&mut self.state, MountState::Unmounted);
        self.generation += 1;
        if let MountState::Mounted(mounted) = state {
            let Mounted {
                mut session,
                surface,
                pending_frame,
                ..
            } = *mounted;
            if let Some(handle) = pending_frame {
                self.host.cancel_frame(handle);
            }
            self.host.detach_listeners();
            session.clear_selection();
            self.orphan_events.extend(session.drain_events());
            self.orphan_sounds.extend(session.drain_sounds());
            self.host.release_surface(surface);
            log::debug!("{}: torn down", session.system_name());
        }
    }

    /// Retry a deferred mount, or pick up a container size change.
    pub fn layout_pass(&mut self) -> Result<(), OrreryError> {
        match std::mem::replace(&mut self.state, MountState::Unmounted) {
            MountState::Pending(system) => match self.start(&system) {
                Ok(()) => Ok(()),
                Err(OrreryError::MountUnavailable) => {
                    self.state = MountState::Pending(system);
                    Ok(())
                }
                Err(err) => Err(err),
            },
            state => {
                self.state = state;
                if let Some(size) = self.host.container_size() {
                    self.on_resize(self.generation, size);
                }
                Ok(())
            }
        }
    }

    /// Frame callback. Returns `false` (and schedules nothing) when the
    /// callback belongs to a torn-down session.
    pub fn on_frame(&mut self, generation: u64, dt: f32) -> bool {
        if generation != self.generation {
            return false;
        }
        let MountState::Mounted(mounted) = &mut self.state else {
            return false;
        };
        if let Some(previous) = mounted.pending_frame.take() {
            self.host.cancel_frame(previous);
        }
        mounted.session.tick(dt);
        self.host.present(&mut mounted.surface, mounted.session.frame());
        mounted.pending_frame = Some(self.host.request_frame(generation));
        true
    }

    /// Resize callback. The surface resizes now; the projection on the next tick.
    pub fn on_resize(&mut self, generation: u64, size: Vec2) -> bool {
        if generation != self.generation || !(size.x > 0.0 && size.y > 0.0) {
            return false;
        }
        let MountState::Mounted(mounted) = &mut self.state else {
            return false;
        };
        if mounted.size != size {
            mounted.size = size;
            self.host.resize_surface(&mut mounted.surface, size);
            mounted.session.push_input(InputEvent::Resize {
                width: size.x,
                height: size.y,
            });
        }
        true
    }

    /// Pointer and control input from a listener of `generation`.
    pub fn push_input(&mut self, generation: u64, event: InputEvent) -> bool {
        if generation != self.generation {
            return false;
        }
        match &mut self.state {
            MountState::Mounted(mounted) => {
                mounted.session.push_input(event);
                true
            }
            _ => false,
        }
    }

    /// Explicit exit action from the view.
    ///
    /// Reported even while unmounted or deferred, so the page can always
    /// leave the view.
    pub fn close(&mut self) {
        match &mut self.state {
            MountState::Mounted(mounted) => mounted.session.close(),
            _ => {
                self.orphan_events.push(OrreryEvent::CloseRequested);
                self.orphan_sounds.push(SoundEvent::EXIT);
            }
        }
    }

    pub fn clear_selection(&mut self) {
        if let MountState::Mounted(mounted) = &mut self.state {
            mounted.session.clear_selection();
        }
    }

    /// Events for the collaborator, including those from torn-down sessions.
    pub fn drain_events(&mut self) -> Vec<OrreryEvent> {
        let mut events = std::mem::take(&mut self.orphan_events);
        if let Some(session) = self.session_mut() {
            events.extend(session.drain_events());
        }
        events
    }

    /// Sound cues, including those from torn-down sessions.
    pub fn drain_sounds(&mut self) -> Vec<SoundEvent> {
        let mut sounds = std::mem::take(&mut self.orphan_sounds);
        if let Some(session) = self.session_mut() {
            sounds.extend(session.drain_sounds());
        }
        sounds
    }

    pub fn session(&self) -> Option<&OrrerySession> {
        match &self.state {
            MountState::Mounted(mounted) => Some(&mounted.session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut OrrerySession> {
        match &mut self.state {
            MountState::Mounted(mounted) => Some(&mut mounted.session),
            _ => None,
        }
    }

    pub fn is_mounted(&self) -> bool {
        matches!(self.state, MountState::Mounted(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, MountState::Pending(_))
    }

    /// Current generation; host callbacks must carry it.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Replace the detail catalog. Takes effect on the next mount.
    pub fn set_details(&mut self, details: DetailCatalog) {
        self.details = details;
    }

    /// Replace the configuration. Takes effect on the next mount.
    pub fn set_config(&mut self, config: OrreryConfig) {
        self.config = config;
    }
}

impl<H: RenderHost> Drop for Orrery<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
