use std::rc::Rc;

use glam::Vec2;
use orrery_engine::{
    FrameData, FrameHandle, InputEvent, OrreryError, PointerButton, RenderHost,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement,
    HtmlElement, KeyboardEvent, MouseEvent, WheelEvent, Window,
};

use crate::presenter;

/// Something the browser did on behalf of a mounted generation.
#[derive(Debug, Clone, Copy)]
pub enum HostCallback {
    /// `requestAnimationFrame` fired; `timestamp` in milliseconds.
    Frame { generation: u64, timestamp: f64 },
    Resize { generation: u64, size: Vec2 },
    Input { generation: u64, event: InputEvent },
}

/// Receives every [`HostCallback`]. Called outside of any engine borrow.
pub type CallbackHook = Rc<dyn Fn(HostCallback)>;

/// A canvas inside the container plus its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pixel_ratio: f64,
}

impl CanvasSurface {
    fn set_size(&self, size: Vec2) {
        self.canvas
            .set_width((size.x as f64 * self.pixel_ratio).round() as u32);
        self.canvas
            .set_height((size.y as f64 * self.pixel_ratio).round() as u32);
    }
}

struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self {
            target,
            kind,
            closure,
        })
    }

    fn detach(self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// [`RenderHost`] backed by a DOM container element and a 2D canvas.
pub struct WebHost {
    window: Window,
    container: HtmlElement,
    hook: CallbackHook,
    /// Canvas of the live surface, for listener attachment.
    canvas: Option<HtmlCanvasElement>,
    listeners: Vec<Listener>,
    frame_callback: Option<(u64, Closure<dyn FnMut(f64)>)>,
}

impl WebHost {
    pub fn new(container: HtmlElement, hook: CallbackHook) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        Ok(Self {
            window,
            container,
            hook,
            canvas: None,
            listeners: Vec::new(),
            frame_callback: None,
        })
    }

    /// Look up the container by element id.
    pub fn from_element_id(id: &str, hook: CallbackHook) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let container = document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{id}'")))?
            .dyn_into::<HtmlElement>()?;
        Self::new(container, hook)
    }

    fn pixel_ratio(&self) -> f64 {
        self.window.device_pixel_ratio().max(1.0)
    }

    fn measure(container: &HtmlElement) -> Option<Vec2> {
        if !container.is_connected() {
            return None;
        }
        Some(Vec2::new(
            container.client_width() as f32,
            container.client_height() as f32,
        ))
    }

    fn try_attach(&mut self, generation: u64) -> Result<(), JsValue> {
        let Some(canvas) = self.canvas.clone() else {
            return Ok(());
        };
        let target: EventTarget = canvas.into();

        let pointer = |kind: &'static str,
                       hook: CallbackHook,
                       convert: fn(&MouseEvent) -> InputEvent|
         -> Result<Listener, JsValue> {
            Listener::attach(target.clone(), kind, move |event: Event| {
                if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                    (hook)(HostCallback::Input {
                        generation,
                        event: convert(mouse),
                    });
                }
            })
        };

        self.listeners.push(pointer("mousedown", self.hook.clone(), |e| {
            InputEvent::PointerDown {
                x: e.offset_x() as f32,
                y: e.offset_y() as f32,
                button: PointerButton::from_dom(e.button()),
            }
        })?);
        self.listeners.push(pointer("mouseup", self.hook.clone(), |e| {
            InputEvent::PointerUp {
                x: e.offset_x() as f32,
                y: e.offset_y() as f32,
            }
        })?);

        // a press released outside the canvas shows up as a buttonless move
        let hook = self.hook.clone();
        self.listeners
            .push(Listener::attach(target.clone(), "mousemove", move |event: Event| {
                let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                if mouse.buttons() == 0 {
                    (hook)(HostCallback::Input {
                        generation,
                        event: InputEvent::PointerCancel,
                    });
                }
                (hook)(HostCallback::Input {
                    generation,
                    event: InputEvent::PointerMove {
                        x: mouse.offset_x() as f32,
                        y: mouse.offset_y() as f32,
                    },
                });
            })?);

        let hook = self.hook.clone();
        self.listeners
            .push(Listener::attach(target.clone(), "wheel", move |event: Event| {
                if let Some(wheel) = event.dyn_ref::<WheelEvent>() {
                    event.prevent_default();
                    (hook)(HostCallback::Input {
                        generation,
                        event: InputEvent::Wheel {
                            delta: wheel.delta_y() as f32,
                        },
                    });
                }
            })?);

        // secondary drag pans, so the context menu must not open
        self.listeners.push(Listener::attach(
            target.clone(),
            "contextmenu",
            |event: Event| event.prevent_default(),
        )?);

        let window: EventTarget = self.window.clone().into();
        let hook = self.hook.clone();
        let canvas_target = target.clone();
        self.listeners
            .push(Listener::attach(window.clone(), "mouseup", move |event: Event| {
                if event.target().is_some_and(|t| t == canvas_target) {
                    return;
                }
                (hook)(HostCallback::Input {
                    generation,
                    event: InputEvent::PointerCancel,
                });
            })?);

        let hook = self.hook.clone();
        let container = self.container.clone();
        self.listeners
            .push(Listener::attach(window.clone(), "resize", move |_| {
                if let Some(size) = Self::measure(&container) {
                    (hook)(HostCallback::Resize { generation, size });
                }
            })?);

        let hook = self.hook.clone();
        self.listeners
            .push(Listener::attach(window, "keydown", move |event: Event| {
                if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                    if key.key() == "Escape" {
                        (hook)(HostCallback::Input {
                            generation,
                            event: InputEvent::Close,
                        });
                    }
                }
            })?);
        Ok(())
    }
}

impl RenderHost for WebHost {
    type Surface = CanvasSurface;

    fn backend(&self) -> &'static str {
        "canvas2d"
    }

    fn container_size(&self) -> Option<Vec2> {
        Self::measure(&self.container)
    }

    fn create_surface(&mut self, size: Vec2) -> Result<CanvasSurface, OrreryError> {
        let surface_err = |e: JsValue| OrreryError::Surface(format!("{e:?}"));
        let document = self
            .window
            .document()
            .ok_or_else(|| OrreryError::Surface("no document".into()))?;
        let canvas = document
            .create_element("canvas")
            .map_err(surface_err)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| OrreryError::Surface("element is not a canvas".into()))?;
        let style = canvas.style();
        style.set_property("width", "100%").map_err(surface_err)?;
        style.set_property("height", "100%").map_err(surface_err)?;
        style.set_property("display", "block").map_err(surface_err)?;

        let ctx = canvas
            .get_context("2d")
            .map_err(surface_err)?
            .ok_or_else(|| OrreryError::Surface("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| OrreryError::Surface("unexpected context type".into()))?;

        self.container
            .append_child(&canvas)
            .map_err(surface_err)?;

        let surface = CanvasSurface {
            canvas: canvas.clone(),
            ctx,
            pixel_ratio: self.pixel_ratio(),
        };
        surface.set_size(size);
        self.canvas = Some(canvas);
        Ok(surface)
    }

    fn resize_surface(&mut self, surface: &mut CanvasSurface, size: Vec2) {
        surface.pixel_ratio = self.pixel_ratio();
        surface.set_size(size);
    }

    fn present(&mut self, surface: &mut CanvasSurface, frame: &FrameData) {
        presenter::draw(&surface.ctx, frame, surface.pixel_ratio);
    }

    fn release_surface(&mut self, surface: CanvasSurface) {
        surface.canvas.remove();
        self.canvas = None;
    }

    fn attach_listeners(&mut self, generation: u64) {
        if let Err(err) = self.try_attach(generation) {
            log::warn!("listener attach failed: {err:?}");
        }
    }

    fn detach_listeners(&mut self) {
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
        self.frame_callback = None;
    }

    fn request_frame(&mut self, generation: u64) -> FrameHandle {
        let stale = !matches!(&self.frame_callback, Some((g, _)) if *g == generation);
        if stale {
            let hook = self.hook.clone();
            let closure = Closure::wrap(Box::new(move |timestamp: f64| {
                (hook)(HostCallback::Frame {
                    generation,
                    timestamp,
                });
            }) as Box<dyn FnMut(f64)>);
            self.frame_callback = Some((generation, closure));
        }
        let Some((_, closure)) = &self.frame_callback else {
            return FrameHandle(0);
        };
        match self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(id) => FrameHandle(id),
            Err(err) => {
                log::error!("requestAnimationFrame failed: {err:?}");
                FrameHandle(0)
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if handle.0 != 0 {
            let _ = self.window.cancel_animation_frame(handle.0);
        }
    }
}
