pub mod host;
pub mod presenter;
pub mod runner;

pub use host::{CallbackHook, CanvasSurface, HostCallback, WebHost};
pub use runner::{OrreryRunner, Outbox};

/// Generate all `#[wasm_bindgen]` exports for an orrery app.
///
/// Generates:
/// - `thread_local!` storage for the [`OrreryRunner`]
/// - `with_orrery()` / `run()` helpers; `run()` delivers JS callbacks after
///   the runner borrow is released
/// - the exports: `orrery_init`, `orrery_mount`, `orrery_switch_system`,
///   `orrery_mount_json`, `orrery_set_details`, `orrery_unmount`,
///   `orrery_layout_pass`, `orrery_close`, `orrery_clear_selection`,
///   `orrery_set_paused`, `orrery_set_speed`, `orrery_reset_view`,
///   `orrery_system_names`, `orrery_on_select`, `orrery_on_close`,
///   `orrery_on_sound`
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// orrery_web::export_orrery!(
///     "my-orrery",
///     systems = include_str!("../data/systems.json"),
///     details = include_str!("../data/planets.json"),
/// );
/// ```
#[macro_export]
macro_rules! export_orrery {
    ($app_name:literal, systems = $systems:expr, details = $details:expr $(,)?) => {
        use std::cell::RefCell;
        use std::rc::Rc;

        thread_local! {
            static ORRERY: RefCell<Option<$crate::OrreryRunner>> = RefCell::new(None);
        }

        /// `None` when not initialized, or when called re-entrantly.
        fn with_orrery<R>(f: impl FnOnce(&mut $crate::OrreryRunner) -> R) -> Option<R> {
            ORRERY.with(|cell| {
                let Ok(mut borrow) = cell.try_borrow_mut() else {
                    log::warn!("{}: re-entrant call ignored", $app_name);
                    return None;
                };
                match borrow.as_mut() {
                    Some(runner) => Some(f(runner)),
                    None => {
                        log::warn!("{}: not initialized, call orrery_init() first", $app_name);
                        None
                    }
                }
            })
        }

        fn run<R>(f: impl FnOnce(&mut $crate::OrreryRunner) -> R) -> Option<R> {
            let (result, outbox) = with_orrery(|r| {
                let result = f(r);
                (result, r.take_outbox())
            })?;
            if !outbox.is_empty() {
                outbox.deliver();
            }
            Some(result)
        }

        fn host_callback(callback: $crate::HostCallback) {
            run(|r| r.handle(callback));
        }

        fn to_js(err: orrery_engine::OrreryError) -> JsValue {
            log::error!("{}: {err}", $app_name);
            JsValue::from_str(&err.to_string())
        }

        #[wasm_bindgen]
        pub fn orrery_init(container_id: &str, config_json: Option<String>) -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let config = match config_json {
                Some(json) => orrery_engine::OrreryConfig::from_json(&json).map_err(to_js)?,
                None => orrery_engine::OrreryConfig::default(),
            };
            let systems = orrery_engine::StarCatalog::from_json($systems).map_err(to_js)?;
            let details = orrery_engine::DetailCatalog::from_json($details).map_err(to_js)?;
            let host = $crate::WebHost::from_element_id(container_id, Rc::new(host_callback))?;
            let runner = $crate::OrreryRunner::new(host, systems, details, config);

            // replacing a previous runner drops it, which tears its view down
            let previous = ORRERY.with(|cell| {
                cell.try_borrow_mut()
                    .map(|mut slot| slot.replace(runner))
                    .map_err(|_| JsValue::from_str("orrery_init called re-entrantly"))
            })?;
            drop(previous);
            log::info!("{}: initialized", $app_name);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn orrery_mount(name: &str) -> Result<(), JsValue> {
            run(|r| r.mount(name)).unwrap_or(Ok(())).map_err(to_js)
        }

        #[wasm_bindgen]
        pub fn orrery_switch_system(name: &str) -> Result<(), JsValue> {
            orrery_mount(name)
        }

        /// Mount a system given as JSON instead of by catalog name.
        #[wasm_bindgen]
        pub fn orrery_mount_json(system_json: &str) -> Result<(), JsValue> {
            let system = orrery_engine::StarSystem::from_json(system_json).map_err(to_js)?;
            run(|r| r.mount_system(system)).unwrap_or(Ok(())).map_err(to_js)
        }

        #[wasm_bindgen]
        pub fn orrery_set_details(details_json: &str) -> Result<(), JsValue> {
            let details = orrery_engine::DetailCatalog::from_json(details_json).map_err(to_js)?;
            run(|r| r.set_details(details));
            Ok(())
        }

        #[wasm_bindgen]
        pub fn orrery_unmount() {
            run(|r| r.unmount());
        }

        /// Call after the container becomes visible or changes size.
        #[wasm_bindgen]
        pub fn orrery_layout_pass() -> Result<(), JsValue> {
            run(|r| r.layout_pass()).unwrap_or(Ok(())).map_err(to_js)
        }

        #[wasm_bindgen]
        pub fn orrery_close() {
            run(|r| r.close());
        }

        #[wasm_bindgen]
        pub fn orrery_clear_selection() {
            run(|r| r.clear_selection());
        }

        #[wasm_bindgen]
        pub fn orrery_set_paused(paused: bool) {
            run(|r| r.control(orrery_engine::InputEvent::SetPaused(paused)));
        }

        #[wasm_bindgen]
        pub fn orrery_set_speed(speed: f32) {
            run(|r| r.control(orrery_engine::InputEvent::SetSpeed(speed)));
        }

        #[wasm_bindgen]
        pub fn orrery_reset_view() {
            run(|r| r.control(orrery_engine::InputEvent::ResetView));
        }

        #[wasm_bindgen]
        pub fn orrery_system_names() -> js_sys::Array {
            with_orrery(|r| {
                r.system_names()
                    .into_iter()
                    .map(JsValue::from_str)
                    .collect::<js_sys::Array>()
            })
            .unwrap_or_default()
        }

        /// `f(record)` on selection, `f(null)` when the selection clears.
        #[wasm_bindgen]
        pub fn orrery_on_select(f: Option<js_sys::Function>) {
            with_orrery(|r| r.set_on_select(f));
        }

        #[wasm_bindgen]
        pub fn orrery_on_close(f: Option<js_sys::Function>) {
            with_orrery(|r| r.set_on_close(f));
        }

        /// `f(id)` for each sound cue.
        #[wasm_bindgen]
        pub fn orrery_on_sound(f: Option<js_sys::Function>) {
            with_orrery(|r| r.set_on_sound(f));
        }
    };
}
