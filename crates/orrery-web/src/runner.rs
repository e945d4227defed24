use js_sys::Function;
use orrery_engine::{
    DetailCatalog, InputEvent, Orrery, OrreryConfig, OrreryError, OrreryEvent, SoundEvent,
    StarCatalog, StarSystem,
};
use wasm_bindgen::JsValue;

use crate::host::{HostCallback, WebHost};

/// Frame delta used for the first frame of a mount, in seconds.
const FIRST_FRAME_DT: f32 = 1.0 / 60.0;
/// Longest frame delta passed on; a backgrounded tab resumes calmly.
const MAX_FRAME_DT: f32 = 0.25;

/// Drives an [`Orrery`] from browser callbacks and collects what JS
/// should be told about.
///
/// The concrete app keeps it in a `thread_local!` and exports free
/// functions via [`crate::export_orrery!`], because wasm-bindgen cannot
/// export generic structs directly.
pub struct OrreryRunner {
    orrery: Orrery<WebHost>,
    systems: StarCatalog,
    /// Generation and timestamp of the last accepted frame.
    last_frame: Option<(u64, f64)>,
    on_select: Option<Function>,
    on_close: Option<Function>,
    on_sound: Option<Function>,
}

impl OrreryRunner {
    pub fn new(
        host: WebHost,
        systems: StarCatalog,
        details: DetailCatalog,
        config: OrreryConfig,
    ) -> Self {
        Self {
            orrery: Orrery::new(host, details, config),
            systems,
            last_frame: None,
            on_select: None,
            on_close: None,
            on_sound: None,
        }
    }

    /// Mount the named system, replacing any current one.
    pub fn mount(&mut self, name: &str) -> Result<(), OrreryError> {
        let system = self
            .systems
            .get(name)
            .cloned()
            .ok_or_else(|| OrreryError::UnknownSystem(name.to_string()))?;
        self.mount_system(system)
    }

    /// Mount a system supplied by the page rather than the bundled catalog.
    pub fn mount_system(&mut self, system: StarSystem) -> Result<(), OrreryError> {
        self.last_frame = None;
        self.orrery.switch_system(system)
    }

    /// Replace the detail catalog; applies from the next mount.
    pub fn set_details(&mut self, details: DetailCatalog) {
        self.orrery.set_details(details);
    }

    pub fn unmount(&mut self) {
        self.orrery.unmount();
        self.last_frame = None;
    }

    pub fn layout_pass(&mut self) -> Result<(), OrreryError> {
        self.orrery.layout_pass()
    }

    pub fn handle(&mut self, callback: HostCallback) {
        match callback {
            HostCallback::Frame {
                generation,
                timestamp,
            } => {
                let dt = frame_dt(self.last_frame, generation, timestamp);
                if self.orrery.on_frame(generation, dt) {
                    self.last_frame = Some((generation, timestamp));
                }
            }
            HostCallback::Resize { generation, size } => {
                self.orrery.on_resize(generation, size);
            }
            HostCallback::Input { generation, event } => {
                self.orrery.push_input(generation, event);
            }
        }
    }

    /// Queue a control event for the current generation.
    pub fn control(&mut self, event: InputEvent) {
        let generation = self.orrery.generation();
        self.orrery.push_input(generation, event);
    }

    pub fn close(&mut self) {
        self.orrery.close();
    }

    pub fn clear_selection(&mut self) {
        self.orrery.clear_selection();
    }

    pub fn system_names(&self) -> Vec<&str> {
        self.systems.names()
    }

    pub fn set_on_select(&mut self, f: Option<Function>) {
        self.on_select = f;
    }

    pub fn set_on_close(&mut self, f: Option<Function>) {
        self.on_close = f;
    }

    pub fn set_on_sound(&mut self, f: Option<Function>) {
        self.on_sound = f;
    }

    /// Everything produced since the last call, bundled with the callbacks
    /// to deliver it to.
    pub fn take_outbox(&mut self) -> Outbox {
        Outbox {
            events: self.orrery.drain_events(),
            sounds: self.orrery.drain_sounds(),
            on_select: self.on_select.clone(),
            on_close: self.on_close.clone(),
            on_sound: self.on_sound.clone(),
        }
    }

    pub fn orrery(&self) -> &Orrery<WebHost> {
        &self.orrery
    }
}

/// Seconds since the last accepted frame of `generation`, clamped to
/// `0..=MAX_FRAME_DT`. A new generation starts at [`FIRST_FRAME_DT`].
fn frame_dt(last_frame: Option<(u64, f64)>, generation: u64, timestamp: f64) -> f32 {
    let dt = match last_frame {
        Some((g, previous)) if g == generation => ((timestamp - previous) / 1000.0) as f32,
        _ => FIRST_FRAME_DT,
    };
    if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        FIRST_FRAME_DT
    }
}

/// Events awaiting delivery to JS.
///
/// Delivered only after the runner borrow is released, so a callback may
/// call straight back into the exports (e.g. unmount on close).
pub struct Outbox {
    events: Vec<OrreryEvent>,
    sounds: Vec<SoundEvent>,
    on_select: Option<Function>,
    on_close: Option<Function>,
    on_sound: Option<Function>,
}

impl Outbox {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.sounds.is_empty()
    }

    pub fn deliver(self) {
        for sound in &self.sounds {
            if let Some(f) = &self.on_sound {
                call(f, &JsValue::from(sound.0));
            }
        }
        for event in &self.events {
            match event {
                OrreryEvent::Selected(record) => {
                    if let Some(f) = &self.on_select {
                        call(f, &record_to_js(record));
                    }
                }
                OrreryEvent::SelectionCleared => {
                    if let Some(f) = &self.on_select {
                        call(f, &JsValue::NULL);
                    }
                }
                OrreryEvent::CloseRequested => {
                    if let Some(f) = &self.on_close {
                        call(f, &JsValue::UNDEFINED);
                    }
                }
            }
        }
    }
}

fn call(f: &Function, arg: &JsValue) {
    if let Err(err) = f.call1(&JsValue::NULL, arg) {
        log::error!("callback threw: {err:?}");
    }
}

/// Record as a plain JS object, with the formatted lines under `lines`.
fn record_to_js(record: &orrery_engine::DetailRecord) -> JsValue {
    let mut value = match serde_json::to_value(record) {
        Ok(value) => value,
        Err(err) => {
            log::error!("{}: record not serializable: {err}", record.name);
            return JsValue::NULL;
        }
    };
    if let Some(object) = value.as_object_mut() {
        object.insert("lines".into(), serde_json::json!(record.display_lines()));
    }
    js_sys::JSON::parse(&value.to_string()).unwrap_or(JsValue::NULL)
}
