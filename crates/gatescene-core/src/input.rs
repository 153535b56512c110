//! Toolkit-independent input events and pointer/keyboard state.

use kurbo::Point;
use std::collections::HashSet;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer event type.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    /// Pointer focus (re-)entered the scene; `position` is the last known cursor.
    Entered {
        position: Option<Point>,
    },
    /// Pointer focus left the scene entirely.
    Left,
}

/// Keyboard event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// Everything the scene reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    Pointer(PointerEvent),
    Key(KeyEvent),
}

impl From<PointerEvent> for SceneEvent {
    fn from(event: PointerEvent) -> Self {
        SceneEvent::Pointer(event)
    }
}

impl From<KeyEvent> for SceneEvent {
    fn from(event: KeyEvent) -> Self {
        SceneEvent::Key(event)
    }
}

/// Pointer state accumulated across events.
///
/// The last known position survives the pointer leaving the window so a
/// release outside the window can still be reported.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Last known pointer position in scene coordinates.
    pub pointer_position: Option<Point>,
    /// Whether the pointer is currently over the scene.
    pub pointer_inside: bool,
    /// Currently held mouse buttons.
    pressed_buttons: HashSet<MouseButton>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) {
        match event {
            PointerEvent::Down { position, button } => {
                self.pointer_position = Some(*position);
                self.pressed_buttons.insert(*button);
            }
            PointerEvent::Up { position, button } => {
                self.pointer_position = Some(*position);
                self.pressed_buttons.remove(button);
            }
            PointerEvent::Move { position } => {
                self.pointer_position = Some(*position);
                self.pointer_inside = true;
            }
            PointerEvent::Entered { position } => {
                self.pointer_inside = true;
                if position.is_some() {
                    self.pointer_position = *position;
                }
            }
            PointerEvent::Left => {
                self.pointer_inside = false;
            }
        }
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    /// Whether any mouse button is held.
    pub fn any_button_pressed(&self) -> bool {
        !self.pressed_buttons.is_empty()
    }

    /// Last known position, but only while the pointer is over the scene.
    pub fn pointer_inside_position(&self) -> Option<Point> {
        self.pointer_position.filter(|_| self.pointer_inside)
    }
}
