//! Element definitions for the scene.

mod gate;
mod square;

pub use gate::Gate;
pub use square::Square;

use crate::surface::Surface;
use kurbo::{Affine, Point, Rect, Size};
use peniko::Color;
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Default element size in scene units.
pub const DEFAULT_SIZE: Size = Size::new(75.0, 75.0);

/// Fill used while an element is not hovered.
pub const NEUTRAL_FILL: Color = Color::from_rgba8(255, 255, 255, 255);
/// Fill used while the pointer rests over an element.
pub const HIGHLIGHT_FILL: Color = Color::from_rgba8(0, 255, 0, 255);
/// Outline color for element glyphs.
pub const OUTLINE_COLOR: Color = Color::from_rgba8(0, 0, 0, 255);
/// Outline width for element glyphs.
pub const OUTLINE_WIDTH: f64 = 2.0;

/// State shared by every element variant.
#[derive(Debug, Clone)]
pub struct ElementBase {
    pub(crate) id: ElementId,
    /// Bounding rectangle in scene coordinates (position + size).
    pub bounds: Rect,
    /// Stacking value; higher is in front.
    pub z_value: f64,
}

impl ElementBase {
    pub fn new(size: Size) -> Self {
        Self {
            id: Uuid::new_v4(),
            bounds: Rect::from_origin_size(Point::ZERO, size),
            z_value: 0.0,
        }
    }
}

/// Common trait for all elements.
pub trait ElementTrait {
    /// Shared element state.
    fn base(&self) -> &ElementBase;

    /// Mutable shared element state.
    fn base_mut(&mut self) -> &mut ElementBase;

    /// Paint the element in local coordinates (origin = top-left).
    fn paint(&self, surface: &mut dyn Surface, transform: Affine);

    /// Called when the pointer starts hovering the element.
    fn on_enter(&mut self) {}

    /// Called when the pointer stops hovering the element.
    fn on_leave(&mut self) {}

    fn id(&self) -> ElementId {
        self.base().id
    }

    fn bounds(&self) -> Rect {
        self.base().bounds
    }

    fn position(&self) -> Point {
        self.base().bounds.origin()
    }

    fn size(&self) -> Size {
        self.base().bounds.size()
    }

    /// Move the top-left corner, keeping the size.
    fn set_position(&mut self, position: Point) {
        let base = self.base_mut();
        base.bounds = base.bounds.with_origin(position);
    }

    fn z_value(&self) -> f64 {
        self.base().z_value
    }

    fn set_z_value(&mut self, z_value: f64) {
        self.base_mut().z_value = z_value;
    }

    /// Check if a point (scene coordinates) lies inside the bounding rectangle.
    fn contains(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }
}

/// Enum wrapper for all element variants.
#[derive(Debug, Clone)]
pub enum Element {
    Gate(Gate),
    Square(Square),
}

impl Element {
    /// Create a gate element at the given top-left position.
    pub fn gate(position: Point) -> Self {
        let mut gate = Gate::new();
        gate.set_position(position);
        Element::Gate(gate)
    }

    /// Create a square element at the given top-left position.
    pub fn square(position: Point) -> Self {
        let mut square = Square::new();
        square.set_position(position);
        Element::Square(square)
    }

    /// Current fill tint.
    pub fn fill(&self) -> Color {
        match self {
            Element::Gate(g) => g.fill,
            Element::Square(s) => s.fill,
        }
    }

    /// Whether the element currently shows its hover tint.
    pub fn is_highlighted(&self) -> bool {
        self.fill().to_rgba8() == HIGHLIGHT_FILL.to_rgba8()
    }
}

impl ElementTrait for Element {
    fn base(&self) -> &ElementBase {
        match self {
            Element::Gate(g) => g.base(),
            Element::Square(s) => s.base(),
        }
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        match self {
            Element::Gate(g) => g.base_mut(),
            Element::Square(s) => s.base_mut(),
        }
    }

    fn paint(&self, surface: &mut dyn Surface, transform: Affine) {
        match self {
            Element::Gate(g) => g.paint(surface, transform),
            Element::Square(s) => s.paint(surface, transform),
        }
    }

    fn on_enter(&mut self) {
        #[cfg(test)]
        hover_log::record(hover_log::HoverCall::Enter(self.id()));
        match self {
            Element::Gate(g) => g.on_enter(),
            Element::Square(s) => s.on_enter(),
        }
    }

    fn on_leave(&mut self) {
        #[cfg(test)]
        hover_log::record(hover_log::HoverCall::Leave(self.id()));
        match self {
            Element::Gate(g) => g.on_leave(),
            Element::Square(s) => s.on_leave(),
        }
    }
}

/// Per-thread record of hover callbacks, for asserting call counts and order.
#[cfg(test)]
pub(crate) mod hover_log {
    use super::ElementId;
    use std::cell::RefCell;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum HoverCall {
        Enter(ElementId),
        Leave(ElementId),
    }

    thread_local! {
        static CALLS: RefCell<Vec<HoverCall>> = const { RefCell::new(Vec::new()) };
    }

    pub fn record(call: HoverCall) {
        CALLS.with(|calls| calls.borrow_mut().push(call));
    }

    /// Drain the calls recorded so far on this thread.
    pub fn take() -> Vec<HoverCall> {
        CALLS.with(|calls| std::mem::take(&mut *calls.borrow_mut()))
    }
}
