//! Pointer and keyboard event types plus per-surface pointer tracking.

use kurbo::Point;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer event in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Move { position: Point },
    Up { position: Point, button: MouseButton },
}

/// Keys the drawing session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Abort the in-progress operation.
    Escape,
    /// Commit the in-progress multi-click run.
    Enter,
}

/// Tracks pointer state across events for one editing surface.
///
/// `moved_since_press` distinguishes a drag gesture from a plain click; it
/// is reset when the left button goes down and survives the release so the
/// gesture handler can still read it.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current pointer position.
    pub pointer_position: Point,
    /// Whether the left button is held.
    pub is_pointer_down: bool,
    /// Where the left button went down, while it is held.
    pub press_position: Option<Point>,
    /// Whether the pointer moved while the left button was held.
    pub moved_since_press: bool,
}

impl InputState {
    /// Create a fresh input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position, button } => {
                self.pointer_position = position;
                if button == MouseButton::Left && !self.is_pointer_down {
                    self.is_pointer_down = true;
                    self.press_position = Some(position);
                    self.moved_since_press = false;
                }
            }
            PointerEvent::Move { position } => {
                if self.is_pointer_down && position != self.pointer_position {
                    self.moved_since_press = true;
                }
                self.pointer_position = position;
            }
            PointerEvent::Up { position, button } => {
                self.pointer_position = position;
                if button == MouseButton::Left {
                    self.is_pointer_down = false;
                    self.press_position = None;
                }
            }
        }
    }
}
