//! Selection overlay painting.

use crate::surface::{Pen, StrokeStyle, Surface};
use kurbo::{Affine, Rect, Shape as KurboShape};
use peniko::Color;

/// Dashed outline drawn around each selected element.
#[derive(Debug, Clone, Copy)]
pub struct SelectionOverlay {
    pub color: Color,
}

impl Default for SelectionOverlay {
    fn default() -> Self {
        Self {
            color: Color::from_rgba8(255, 0, 0, 255),
        }
    }
}

impl SelectionOverlay {
    /// Outline rectangle for an element: +2 left/top, +1 right/bottom.
    pub fn outline(bounds: Rect) -> Rect {
        Rect::new(bounds.x0 - 2.0, bounds.y0 - 2.0, bounds.x1 + 1.0, bounds.y1 + 1.0)
    }

    /// Paint one outline per selected element bounds.
    pub fn paint(&self, surface: &mut dyn Surface, selected: impl IntoIterator<Item = Rect>) {
        let pen = Pen::new(self.color, 1.0).with_style(StrokeStyle::Dashed);
        for bounds in selected {
            let path = Self::outline(bounds).to_path(0.1);
            surface.draw_path(Affine::IDENTITY, &path, &pen, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::{PaintOp, RecordingSurface};

    #[test]
    fn test_outline_margins() {
        let outline = SelectionOverlay::outline(Rect::new(10.0, 20.0, 85.0, 95.0));
        assert!((outline.x0 - 8.0).abs() < f64::EPSILON);
        assert!((outline.y0 - 18.0).abs() < f64::EPSILON);
        assert!((outline.x1 - 86.0).abs() < f64::EPSILON);
        assert!((outline.y1 - 96.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_paint_is_dashed_and_unfilled() {
        let mut surface = RecordingSurface::default();
        SelectionOverlay::default().paint(&mut surface, [Rect::new(0.0, 0.0, 75.0, 75.0)]);
        assert_eq!(surface.ops.len(), 1);
        match surface.ops[0] {
            PaintOp::Path { style, filled, .. } => {
                assert_eq!(style, StrokeStyle::Dashed);
                assert!(!filled);
            }
            ref other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn test_empty_selection_paints_nothing() {
        let mut surface = RecordingSurface::default();
        SelectionOverlay::default().paint(&mut surface, Vec::new());
        assert!(surface.ops.is_empty());
    }
}
