//! Vello-based renderer implementation.

use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use gatescene_core::surface::{Pen, Surface};
use kurbo::{Affine, BezPath, Rect, Stroke};
use parley::layout::PositionedLayoutItem;
use parley::{FontContext, LayoutContext, StyleProperty};
use peniko::{Brush, Color, Fill};
use vello::Scene;

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
    /// Font context for text rendering (system fonts, cached).
    font_cx: FontContext,
    /// Layout context for text rendering.
    layout_cx: LayoutContext<Brush>,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            font_cx: FontContext::new(),
            layout_cx: LayoutContext::new(),
        }
    }

    /// Get the built scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take the built scene, leaving an empty one behind.
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Borrow a painting surface over the current Vello scene.
    pub fn surface(&mut self, root: Affine) -> VelloSurface<'_> {
        VelloSurface {
            scene: &mut self.scene,
            font_cx: &mut self.font_cx,
            layout_cx: &mut self.layout_cx,
            root,
        }
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        self.scene.reset();
        if ctx.viewport_size.is_zero_area() {
            return Err(RendererError::RenderFailed(format!(
                "empty viewport {}x{}",
                ctx.viewport_size.width, ctx.viewport_size.height
            )));
        }
        let root = Affine::scale(ctx.scale_factor);
        let mut surface = self.surface(root);
        ctx.scene.paint(&mut surface);
        Ok(())
    }
}

/// [`Surface`] implementation that encodes into a Vello scene.
pub struct VelloSurface<'a> {
    scene: &'a mut Scene,
    font_cx: &'a mut FontContext,
    layout_cx: &'a mut LayoutContext<Brush>,
    /// Scene-to-device transform (HiDPI scale).
    root: Affine,
}

impl Surface for VelloSurface<'_> {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.scene.fill(Fill::NonZero, self.root, color, None, &rect);
    }

    fn draw_path(&mut self, transform: Affine, path: &BezPath, pen: &Pen, fill: Option<Color>) {
        let transform = self.root * transform;
        if let Some(fill_color) = fill {
            self.scene.fill(Fill::NonZero, transform, fill_color, None, path);
        }

        let mut stroke = Stroke::new(pen.width);
        let pattern = pen.style.dash_pattern();
        if !pattern.is_empty() {
            let dashes: Vec<f64> = pattern.iter().map(|d| d * pen.width).collect();
            stroke = stroke.with_dashes(0.0, dashes);
        }
        self.scene.stroke(&stroke, transform, pen.color, None, path);
    }

    fn draw_text(&mut self, transform: Affine, rect: Rect, text: &str, font_size: f64, color: Color) {
        let brush = Brush::Solid(color);

        let mut builder = self.layout_cx.ranged_builder(self.font_cx, text, 1.0, false);
        builder.push_default(StyleProperty::FontSize(font_size as f32));
        builder.push_default(StyleProperty::Brush(brush.clone()));
        builder.push_default(StyleProperty::FontStack(parley::FontStack::Single(
            parley::FontFamily::Generic(parley::GenericFamily::SansSerif),
        )));
        let mut layout = builder.build(text);
        layout.break_all_lines(None);
        layout.align(None, parley::Alignment::Start, parley::AlignmentOptions::default());

        let width = layout.width() as f64;
        let height = layout.height() as f64;
        let origin = rect.center() - kurbo::Vec2::new(width / 2.0, height / 2.0);
        let text_transform = self.root * transform * Affine::translate(origin.to_vec2());

        let mut glyph_count = 0;
        for line in layout.lines() {
            for item in line.items() {
                let PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let mut x = glyph_run.offset();
                let y = glyph_run.baseline();
                let run = glyph_run.run();
                let glyphs: Vec<vello::Glyph> = glyph_run
                    .glyphs()
                    .map(|glyph| {
                        let gx = x + glyph.x;
                        let gy = y - glyph.y;
                        x += glyph.advance;
                        vello::Glyph {
                            id: glyph.id,
                            x: gx,
                            y: gy,
                        }
                    })
                    .collect();
                glyph_count += glyphs.len();

                if !glyphs.is_empty() {
                    self.scene
                        .draw_glyphs(run.font())
                        .brush(&brush)
                        .hint(true)
                        .transform(text_transform)
                        .font_size(run.font_size())
                        .normalized_coords(run.normalized_coords())
                        .draw(Fill::NonZero, glyphs.into_iter());
                }
            }
        }

        // No system font matched: mark where the label would be.
        if glyph_count == 0 {
            log::warn!("No glyphs rendered for label {:?}", text);
            let approx_width = text.len() as f64 * font_size * 0.6;
            let placeholder = Rect::from_center_size(rect.center(), (approx_width, font_size));
            self.scene.fill(
                Fill::NonZero,
                self.root * transform,
                Color::from_rgba8(255, 100, 100, 100),
                None,
                &placeholder,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatescene_core::Scene as GateScene;
    use kurbo::{Point, Size};

    #[test]
    fn test_renderer_creation() {
        let renderer = VelloRenderer::new();
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_empty_scene() {
        let mut renderer = VelloRenderer::new();
        let scene = GateScene::default();
        let ctx = RenderContext::new(&scene, Size::new(640.0, 480.0));
        renderer.build_scene(&ctx).unwrap();
        // Background fill at minimum.
        assert!(!renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_rejects_empty_viewport() {
        let mut renderer = VelloRenderer::new();
        let scene = GateScene::default();
        let ctx = RenderContext::new(&scene, Size::new(0.0, 480.0));
        let err = renderer.build_scene(&ctx).unwrap_err();
        assert!(matches!(err, RendererError::RenderFailed(_)));
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_demo_scene() {
        let mut renderer = VelloRenderer::new();
        let mut scene = GateScene::demo(Size::new(640.0, 480.0));
        scene.pointer_moved(Point::new(300.0, 45.0));
        let ctx = RenderContext::new(&scene, Size::new(640.0, 480.0)).with_scale_factor(2.0);
        renderer.build_scene(&ctx).unwrap();
        assert!(!renderer.scene().encoding().is_empty());

        let taken = renderer.take_scene();
        assert!(!taken.encoding().is_empty());
        assert!(renderer.scene().encoding().is_empty());
    }
}
