//! Painting abstraction shared by elements and the scene.
//!
//! Elements describe themselves in local coordinates against a [`Surface`];
//! the render crate provides the GPU-backed implementation.

use kurbo::{Affine, BezPath, Rect};
use peniko::Color;

/// Stroke style for outlines and guides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl StrokeStyle {
    /// Dash pattern in multiples of the stroke width (empty = solid).
    pub fn dash_pattern(self) -> &'static [f64] {
        match self {
            StrokeStyle::Solid => &[],
            StrokeStyle::Dashed => &[4.0, 2.0],
            StrokeStyle::Dotted => &[1.0, 2.0],
        }
    }
}

/// Outline description used when stroking a path.
#[derive(Debug, Clone, Copy)]
pub struct Pen {
    pub color: Color,
    pub width: f64,
    pub style: StrokeStyle,
}

impl Pen {
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }
}

/// A target that elements and overlays paint into.
pub trait Surface {
    /// Fill an axis-aligned rectangle (scene coordinates).
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Fill (if `fill` is set) and then stroke a path.
    fn draw_path(&mut self, transform: Affine, path: &BezPath, pen: &Pen, fill: Option<Color>);

    /// Draw a single line of text centered inside `rect`.
    fn draw_text(&mut self, transform: Affine, rect: Rect, text: &str, font_size: f64, color: Color);
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_patterns() {
        assert!(StrokeStyle::Solid.dash_pattern().is_empty());
        assert_eq!(StrokeStyle::Dashed.dash_pattern().len(), 2);
        assert_eq!(StrokeStyle::Dotted.dash_pattern(), &[1.0, 2.0]);
    }

    #[test]
    fn test_pen_builder() {
        let pen = Pen::new(Color::from_rgba8(255, 0, 0, 255), 1.0).with_style(StrokeStyle::Dashed);
        assert_eq!(pen.style, StrokeStyle::Dashed);
        assert!((pen.width - 1.0).abs() < f64::EPSILON);
    }
}
