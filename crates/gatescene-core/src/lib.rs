//! GateScene Core Library
//!
//! Toolkit-independent scene model for the GateScene canvas: elements,
//! hit-testing, drag/hover interaction and the wiring assistant.

pub mod elements;
pub mod guideline;
pub mod input;
pub mod interaction;
pub mod scene;
pub mod selection;
pub mod surface;

pub use elements::{Element, ElementBase, ElementId, ElementTrait, Gate, Square};
pub use guideline::{GUIDELINE_THRESHOLD_SQ, Guidelines};
pub use input::{InputState, KeyEvent, MouseButton, PointerEvent, SceneEvent};
pub use interaction::Interaction;
pub use scene::{ASSISTANT_TOGGLE_KEY, Scene, SceneError, Z_STEP};
pub use selection::SelectionOverlay;
pub use surface::{Pen, StrokeStyle, Surface};
