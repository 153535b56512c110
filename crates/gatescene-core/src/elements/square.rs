//! Square glyph with a centered label.

use super::{DEFAULT_SIZE, ElementBase, ElementTrait, HIGHLIGHT_FILL, NEUTRAL_FILL, OUTLINE_COLOR, OUTLINE_WIDTH};
use crate::surface::{Pen, Surface};
use kurbo::{Affine, Rect, Shape as KurboShape};
use peniko::Color;

/// Label font size in scene units.
const LABEL_FONT_SIZE: f64 = 12.0;

/// A labelled square element.
#[derive(Debug, Clone)]
pub struct Square {
    base: ElementBase,
    /// Current fill tint (swapped on hover).
    pub fill: Color,
    /// Text drawn in the middle of the square.
    pub label: String,
}

impl Square {
    pub const DEFAULT_LABEL: &'static str = "HELLO";

    pub fn new() -> Self {
        Self::with_label(Self::DEFAULT_LABEL)
    }

    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            base: ElementBase::new(DEFAULT_SIZE),
            fill: NEUTRAL_FILL,
            label: label.into(),
        }
    }

    /// Outline in local coordinates.
    pub fn local_rect(&self) -> Rect {
        Rect::from_origin_size(kurbo::Point::ZERO, self.size())
    }
}

impl Default for Square {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTrait for Square {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn paint(&self, surface: &mut dyn Surface, transform: Affine) {
        let rect = self.local_rect();
        let pen = Pen::new(OUTLINE_COLOR, OUTLINE_WIDTH);
        surface.draw_path(transform, &rect.to_path(0.1), &pen, Some(self.fill));
        if !self.label.is_empty() {
            surface.draw_text(transform, rect, &self.label, LABEL_FONT_SIZE, OUTLINE_COLOR);
        }
    }

    fn on_enter(&mut self) {
        self.fill = HIGHLIGHT_FILL;
    }

    fn on_leave(&mut self) {
        self.fill = NEUTRAL_FILL;
    }
}
