//! Gate glyph: a chevron with an output bubble.

use super::{DEFAULT_SIZE, ElementBase, ElementTrait, HIGHLIGHT_FILL, NEUTRAL_FILL, OUTLINE_COLOR, OUTLINE_WIDTH};
use crate::surface::{Pen, Surface};
use kurbo::{Affine, BezPath, Circle, Point, Shape as KurboShape};
use peniko::Color;

/// Radius of the output bubble.
const BUBBLE_RADIUS: f64 = 3.0;

/// An inverter-style gate element.
#[derive(Debug, Clone)]
pub struct Gate {
    base: ElementBase,
    /// Current fill tint (swapped on hover).
    pub fill: Color,
}

impl Gate {
    pub fn new() -> Self {
        Self {
            base: ElementBase::new(DEFAULT_SIZE),
            fill: NEUTRAL_FILL,
        }
    }

    /// Chevron body in local coordinates.
    pub fn body_path(&self) -> BezPath {
        let size = self.size();
        let mut path = BezPath::new();
        path.move_to(Point::ZERO);
        path.line_to(Point::new(size.width - 5.0, size.height / 2.0));
        path.line_to(Point::new(0.0, size.height));
        path.close_path();
        path
    }

    /// Output bubble near the chevron tip, in local coordinates.
    pub fn bubble(&self) -> Circle {
        let size = self.size();
        Circle::new(Point::new(size.width - 2.0, size.height / 2.0), BUBBLE_RADIUS)
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTrait for Gate {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn paint(&self, surface: &mut dyn Surface, transform: Affine) {
        let pen = Pen::new(OUTLINE_COLOR, OUTLINE_WIDTH);
        surface.draw_path(transform, &self.body_path(), &pen, Some(self.fill));
        surface.draw_path(transform, &self.bubble().to_path(0.1), &pen, Some(self.fill));
    }

    fn on_enter(&mut self) {
        self.fill = HIGHLIGHT_FILL;
    }

    fn on_leave(&mut self) {
        self.fill = NEUTRAL_FILL;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::{PaintOp, RecordingSurface};

    #[test]
    fn test_body_spans_element() {
        let gate = Gate::new();
        let bounds = gate.body_path().bounding_box();
        assert!((bounds.x1 - 70.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bubble_at_tip() {
        let gate = Gate::new();
        let bubble = gate.bubble();
        assert!((bubble.center.x - 73.0).abs() < f64::EPSILON);
        assert!((bubble.center.y - 37.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_paint_draws_body_and_bubble() {
        let gate = Gate::new();
        let mut surface = RecordingSurface::default();
        gate.paint(&mut surface, Affine::IDENTITY);
        assert_eq!(surface.ops.len(), 2);
        assert!(surface.ops.iter().all(|op| matches!(op, PaintOp::Path { filled: true, .. })));
    }
}
