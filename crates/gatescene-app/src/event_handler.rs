//! Translation of winit window events into scene events.

use gatescene_core::input::{InputState, KeyEvent, MouseButton, PointerEvent, SceneEvent};
use kurbo::Point;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, NamedKey};

/// Convert a winit mouse button to our button type.
fn map_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

/// Name of a logical key as the scene understands it.
pub fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(c) => Some(c.to_string()),
        Key::Named(NamedKey::Delete) => Some("Delete".to_string()),
        Key::Named(NamedKey::Backspace) => Some("Backspace".to_string()),
        _ => None,
    }
}

/// Tracks the pointer and turns window events into [`SceneEvent`]s.
///
/// Positions are converted to logical pixels so the scene never sees
/// the display scale factor.
#[derive(Debug, Default)]
pub struct EventHandler {
    /// Pointer position, inside flag and held buttons.
    input: InputState,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor position, if the cursor is over the window.
    pub fn cursor_position(&self) -> Option<Point> {
        self.input.pointer_inside_position()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Whether a press that reached the scene is still held.
    pub fn is_pressing(&self) -> bool {
        self.input.any_button_pressed()
    }

    /// Translate a window event. Events the scene does not care about map to `None`.
    pub fn translate(&mut self, event: &WindowEvent, scale_factor: f64) -> Option<SceneEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                Some(self.cursor_moved(*position, scale_factor))
            }
            WindowEvent::CursorEntered { .. } => Some(self.cursor_entered()),
            WindowEvent::CursorLeft { .. } => Some(self.cursor_left()),
            WindowEvent::Focused(focused) => Some(self.focus_changed(*focused)),
            WindowEvent::MouseInput { state, button, .. } => self.mouse_input(*state, *button),
            WindowEvent::KeyboardInput { event, .. } => {
                self.key_input(event.state, &event.logical_key)
            }
            _ => None,
        }
    }

    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>, scale_factor: f64) -> SceneEvent {
        let logical = position.to_logical::<f64>(scale_factor);
        let point = Point::new(logical.x, logical.y);
        self.record(PointerEvent::Move { position: point })
    }

    pub fn cursor_entered(&mut self) -> SceneEvent {
        self.record(PointerEvent::Entered {
            position: self.input.pointer_position,
        })
    }

    /// The last position is kept so a release outside the window still lands.
    pub fn cursor_left(&mut self) -> SceneEvent {
        self.record(PointerEvent::Left)
    }

    /// Focus changes resync hover: losing focus drops it, gaining focus
    /// re-evaluates it at the cursor if the cursor is over the window.
    pub fn focus_changed(&mut self, focused: bool) -> SceneEvent {
        if focused {
            SceneEvent::Pointer(PointerEvent::Entered {
                position: self.input.pointer_inside_position(),
            })
        } else {
            SceneEvent::Pointer(PointerEvent::Left)
        }
    }

    /// Presses need the cursor over the window. Releases are forwarded only
    /// for buttons whose press was forwarded, wherever the cursor is.
    pub fn mouse_input(
        &mut self,
        state: ElementState,
        button: winit::event::MouseButton,
    ) -> Option<SceneEvent> {
        let button = map_button(button)?;
        let event = match state {
            ElementState::Pressed => PointerEvent::Down {
                position: self.input.pointer_inside_position()?,
                button,
            },
            ElementState::Released => {
                if !self.input.is_button_pressed(button) {
                    return None;
                }
                PointerEvent::Up {
                    position: self.input.pointer_position?,
                    button,
                }
            }
        };
        Some(self.record(event))
    }

    pub fn key_input(&mut self, state: ElementState, key: &Key) -> Option<SceneEvent> {
        let name = key_name(key)?;
        let event = match state {
            ElementState::Pressed => KeyEvent::Pressed(name),
            ElementState::Released => KeyEvent::Released(name),
        };
        Some(SceneEvent::Key(event))
    }

    fn record(&mut self, event: PointerEvent) -> SceneEvent {
        self.input.handle_pointer_event(&event);
        SceneEvent::Pointer(event)
    }
}
