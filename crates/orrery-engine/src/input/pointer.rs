//! Click versus drag discrimination for a single pointer.

use glam::Vec2;

use super::queue::PointerButton;

/// Default screen distance (pixels) a press may travel and still count as a click.
pub const DEFAULT_DRAG_THRESHOLD: f32 = 8.0;

/// What a pointer move means for the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub button: PointerButton,
    /// Movement since the previous move event.
    pub delta: Vec2,
}

/// Tracks one press from down to up.
#[derive(Debug, Clone)]
pub struct PointerGesture {
    threshold: f32,
    pressed: Option<PointerButton>,
    start: Vec2,
    last: Vec2,
    dragging: bool,
}

impl PointerGesture {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            pressed: None,
            start: Vec2::ZERO,
            last: Vec2::ZERO,
            dragging: false,
        }
    }

    pub fn press(&mut self, pos: Vec2, button: PointerButton) {
        self.pressed = Some(button);
        self.start = pos;
        self.last = pos;
        self.dragging = false;
    }

    /// Returns the drag step once the press has travelled past the threshold.
    pub fn move_to(&mut self, pos: Vec2) -> Option<Drag> {
        let button = self.pressed?;
        if !self.dragging && pos.distance(self.start) > self.threshold {
            self.dragging = true;
        }
        let delta = pos - self.last;
        self.last = pos;
        self.dragging.then_some(Drag { button, delta })
    }

    /// Ends the press. Returns the click position when it never became a drag.
    pub fn release(&mut self, pos: Vec2) -> Option<Vec2> {
        self.pressed.take()?;
        let click = !self.dragging && pos.distance(self.start) <= self.threshold;
        self.dragging = false;
        click.then_some(pos)
    }

    /// Forget the current press without producing a click.
    pub fn cancel(&mut self) {
        self.pressed = None;
        self.dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

impl Default for PointerGesture {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD)
    }
}
