//! Renderer trait abstraction.

use gatescene_core::Scene;
use kurbo::Size;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The scene to render.
    pub scene: &'a Scene,
    /// Viewport size in logical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Clear color behind the scene background.
    pub background_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(scene: &'a Scene, viewport_size: Size) -> Self {
        Self {
            scene,
            viewport_size,
            scale_factor: 1.0,
            background_color: scene.background,
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the clear color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the scene/command buffer for a frame.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_context_defaults() {
        let scene = Scene::default();
        let ctx = RenderContext::new(&scene, Size::new(640.0, 480.0));
        assert!((ctx.scale_factor - 1.0).abs() < f64::EPSILON);
        assert_eq!(ctx.background_color.to_rgba8(), scene.background.to_rgba8());
    }

    #[test]
    fn test_render_context_builders() {
        let scene = Scene::default();
        let ctx = RenderContext::new(&scene, Size::new(640.0, 480.0))
            .with_scale_factor(2.0)
            .with_background(Color::from_rgba8(10, 20, 30, 255));
        assert!((ctx.scale_factor - 2.0).abs() < f64::EPSILON);
        assert_eq!(ctx.background_color.to_rgba8().g, 20);
    }
}
