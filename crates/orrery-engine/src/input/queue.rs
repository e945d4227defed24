/// Which pointer button started a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left mouse button or a touch. Drag orbits the camera.
    Primary,
    /// Right or middle button. Drag pans the camera.
    Secondary,
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` value.
    pub fn from_dom(button: i16) -> Self {
        if button == 0 {
            PointerButton::Primary
        } else {
            PointerButton::Secondary
        }
    }
}

/// Input events the orrery understands.
/// Pointer coordinates are viewport pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32, button: PointerButton },
    PointerUp { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    /// The press ended somewhere the view could not see; no click results.
    PointerCancel,
    /// Scroll; positive `delta` zooms out.
    Wheel { delta: f32 },
    /// The viewport changed size (pixels).
    Resize { width: f32, height: f32 },
    SetPaused(bool),
    SetSpeed(f32),
    ResetView,
    ClearSelection,
    Close,
}

/// A queue of input events.
/// Host callbacks push events; the session drains them between ticks.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events, resizes first, everything else in arrival
    /// order.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        let mut events = std::mem::take(&mut self.events);
        // stable sort keeps the relative order within each group
        events.sort_by_key(|e| !matches!(e, InputEvent::Resize { .. }));
        events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0, button: PointerButton::Primary });
        q.push(InputEvent::Wheel { delta: 3.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn resizes_drain_first() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 1.0, y: 1.0, button: PointerButton::Primary });
        q.push(InputEvent::Resize { width: 640.0, height: 480.0 });
        q.push(InputEvent::PointerUp { x: 1.0, y: 1.0 });
        q.push(InputEvent::Resize { width: 800.0, height: 600.0 });
        let events = q.drain();
        assert_eq!(events[0], InputEvent::Resize { width: 640.0, height: 480.0 });
        assert_eq!(events[1], InputEvent::Resize { width: 800.0, height: 600.0 });
        assert!(matches!(events[2], InputEvent::PointerDown { .. }));
        assert!(matches!(events[3], InputEvent::PointerUp { .. }));
    }

    #[test]
    fn dom_buttons() {
        assert_eq!(PointerButton::from_dom(0), PointerButton::Primary);
        assert_eq!(PointerButton::from_dom(2), PointerButton::Secondary);
    }
}
