//! Core application state and lifecycle.

use gatescene_core::Scene;
use gatescene_render::{RenderContext, Renderer, RendererError, VelloRenderer};
use kurbo::Size;
use peniko::Color;
use std::sync::Arc;
use thiserror::Error;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::event_handler::EventHandler;
use crate::ui::{UiAction, UiState, render_ui};

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("Surface creation failed: {0}")]
    Surface(String),
    #[error(transparent)]
    Renderer(#[from] RendererError),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub min_width: u32,
    pub min_height: u32,
    pub background_color: Color,
    /// Whether the wiring assistant is shown at startup.
    pub assistant_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Custom Graphics Scene".to_string(),
            width: 640,
            height: 480,
            min_width: 640,
            min_height: 480,
            background_color: Color::WHITE,
            assistant_enabled: true,
        }
    }
}

impl AppConfig {
    /// Build the seeded scene for this configuration.
    pub fn build_scene(&self, viewport: Size) -> Scene {
        let mut scene = Scene::demo(viewport);
        scene.background = self.background_color;
        if scene.assistant_enabled() != self.assistant_enabled {
            scene.toggle_assistant();
        }
        scene
    }
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    scene_renderer: VelloRenderer,
    /// Copies the RGBA render target into the surface format.
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    ui_state: UiState,

    // State
    scene: Scene,
    events: EventHandler,
    config: AppConfig,
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
    /// First fatal error raised inside the event loop.
    init_error: Option<AppError>,
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
            init_error: None,
        }
    }

    /// Run the application until the window is closed.
    pub fn run(config: AppConfig) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        let mut app = App::with_config(config);
        event_loop.run_app(&mut app)?;

        match app.init_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        log::info!("Creating window...");

        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height))
            .with_min_inner_size(LogicalSize::new(self.config.min_width, self.config.min_height));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };
        log::info!("Window created, surface size: {}x{}", width, height);

        let render_cx = self
            .render_cx
            .get_or_insert_with(vello::util::RenderContext::new);
        let surface = pollster::block_on(render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        ))
        .map_err(|e| AppError::Surface(e.to_string()))?;

        let device = &render_cx.devices[surface.dev_id].device;
        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(e.to_string()))?;
        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface.config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let logical = size.to_logical::<f64>(window.scale_factor());
        let scene = self
            .config
            .build_scene(Size::new(logical.width, logical.height));

        log::info!("GateScene initialized - {} elements", scene.len());

        self.state = Some(AppState {
            window: window.clone(),
            surface,
            vello_renderer,
            scene_renderer: VelloRenderer::new(),
            texture_blitter,
            egui_ctx,
            egui_state,
            egui_renderer,
            ui_state: UiState::new(self.config.assistant_enabled),
            scene,
            events: EventHandler::new(),
            config: self.config.clone(),
        });

        window.request_redraw();
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        log::error!("{err}");
        if self.init_error.is_none() {
            self.init_error = Some(err);
        }
        event_loop.exit();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether canvas input goes to the overlay instead of the scene.
/// A press that reached the scene keeps the pointer until its release.
fn overlay_captures(egui_wants_input: bool, scene: &Scene, events: &EventHandler) -> bool {
    egui_wants_input && scene.grabbed().is_none() && !events.is_pressing()
}

impl AppState {
    fn scale_factor(&self) -> f64 {
        self.window.scale_factor()
    }

    /// Paint the scene with Vello, then the egui overlay on top, and present.
    fn render_frame(&mut self, render_cx: &vello::util::RenderContext) {
        self.ui_state.assistant_enabled = self.scene.assistant_enabled();
        self.ui_state.selection_count = self.scene.selection().len();
        self.ui_state.element_count = self.scene.len();

        let egui_input = self.egui_state.take_egui_input(&self.window);
        let mut ui_action = None;
        let egui_output = self.egui_ctx.run(egui_input, |ctx| {
            ui_action = render_ui(ctx, &mut self.ui_state);
        });
        if let Some(UiAction::ToggleAssistant) = ui_action {
            self.scene.toggle_assistant();
        }
        self.egui_state
            .handle_platform_output(&self.window, egui_output.platform_output);
        let egui_primitives = self
            .egui_ctx
            .tessellate(egui_output.shapes, egui_output.pixels_per_point);

        let ctx = RenderContext::new(&self.scene, self.scene.viewport_size())
            .with_scale_factor(self.scale_factor())
            .with_background(self.config.background_color);
        if let Err(e) = self.scene_renderer.build_scene(&ctx) {
            log::error!("Failed to build scene: {e}");
            return;
        }
        let base_color = self.scene_renderer.background_color(&ctx);
        let scene = self.scene_renderer.take_scene();

        let device_handle = &render_cx.devices[self.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = match self.surface.surface.get_current_texture() {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Failed to get surface texture: {:?}", e);
                return;
            }
        };

        let width = self.surface.config.width;
        let height = self.surface.config.height;

        let params = RenderParams {
            base_color,
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Vello needs a storage-bindable Rgba8Unorm target; the surface may be Bgra8Unorm.
        let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("vello render texture"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC
                | vello::wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let render_texture_view =
            render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        if let Err(e) = self.vello_renderer.render_to_texture(
            device,
            queue,
            &scene,
            &render_texture_view,
            &params,
        ) {
            log::error!("Failed to render: {:?}", e);
            return;
        }

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());

        {
            let mut blit_encoder =
                device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                    label: Some("blit encoder"),
                });
            self.texture_blitter
                .copy(device, &mut blit_encoder, &render_texture_view, &surface_view);
            queue.submit(std::iter::once(blit_encoder.finish()));
        }

        for (id, image_delta) in &egui_output.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: egui_output.pixels_per_point,
        };

        {
            let mut egui_encoder =
                device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                    label: Some("egui encoder"),
                });
            self.egui_renderer.update_buffers(
                device,
                queue,
                &mut egui_encoder,
                &egui_primitives,
                &screen_descriptor,
            );

            let render_pass = egui_encoder.begin_render_pass(&vello::wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(vello::wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: vello::wgpu::Operations {
                        load: vello::wgpu::LoadOp::Load,
                        store: vello::wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, &egui_primitives, &screen_descriptor);
            drop(render_pass);

            queue.submit(std::iter::once(egui_encoder.finish()));
        }

        for id in &egui_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        surface_texture.present();

        // A toggle from the overlay changed the scene after it was encoded.
        if self.scene.take_repaint() {
            self.window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        let egui_response = state.egui_state.on_window_event(&state.window, &event);
        let egui_wants_input = egui_response.consumed
            || state.egui_ctx.is_pointer_over_area()
            || state.egui_ctx.wants_pointer_input()
            || state.egui_ctx.wants_keyboard_input();
        let overlay_captures = overlay_captures(egui_wants_input, &state.scene, &state.events);
        if egui_response.repaint {
            state.window.request_redraw();
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                let logical = size.to_logical::<f64>(state.scale_factor());
                state
                    .scene
                    .set_viewport_size(Size::new(logical.width, logical.height));

                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }
                state.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                // Clear first so events during the frame schedule the next one.
                state.scene.take_repaint();
                if let Some(render_cx) = self.render_cx.as_ref() {
                    state.render_frame(render_cx);
                }
            }

            WindowEvent::CursorMoved { .. }
            | WindowEvent::MouseInput { .. }
            | WindowEvent::KeyboardInput { .. }
                if overlay_captures =>
            {
                // Keep tracking the cursor so focus changes resync correctly.
                if matches!(event, WindowEvent::CursorMoved { .. }) {
                    let scale_factor = state.scale_factor();
                    let _ = state.events.translate(&event, scale_factor);
                }
            }

            event => {
                let scale_factor = state.scale_factor();
                if let Some(scene_event) = state.events.translate(&event, scale_factor) {
                    state.scene.handle_event(&scene_event);
                }
                if state.scene.needs_repaint() {
                    state.window.request_redraw();
                }
            }
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.title, "Custom Graphics Scene");
        assert_eq!((config.min_width, config.min_height), (640, 480));
        assert!(config.width >= config.min_width);
        assert!(config.height >= config.min_height);
        assert!(config.assistant_enabled);
    }

    #[test]
    fn test_build_scene_applies_config() {
        let config = AppConfig {
            background_color: Color::from_rgba8(10, 20, 30, 255),
            assistant_enabled: false,
            ..AppConfig::default()
        };
        let scene = config.build_scene(Size::new(640.0, 480.0));
        assert_eq!(scene.len(), 9);
        assert!(!scene.assistant_enabled());
        assert_eq!(scene.background.to_rgba8(), config.background_color.to_rgba8());
    }

    #[test]
    fn test_drag_keeps_pointer_over_overlay() {
        use gatescene_core::{Element, SceneEvent};
        use winit::dpi::PhysicalPosition;
        use winit::event::{ElementState, MouseButton};

        let mut scene = Scene::default();
        scene.add_element(Element::square(kurbo::Point::new(100.0, 350.0)));
        let mut events = EventHandler::new();
        assert!(overlay_captures(true, &scene, &events));
        assert!(!overlay_captures(false, &scene, &events));

        let feed = |scene: &mut Scene, event: Option<SceneEvent>| {
            if let Some(event) = event {
                scene.handle_event(&event);
            }
        };
        let e = events.cursor_moved(PhysicalPosition::new(120.0, 380.0), 1.0);
        feed(&mut scene, Some(e));
        let e = events.mouse_input(ElementState::Pressed, MouseButton::Left);
        feed(&mut scene, e);

        // Over the status panel mid-drag: moves and the release still reach the scene.
        assert!(!overlay_captures(true, &scene, &events));
        let e = events.cursor_moved(PhysicalPosition::new(40.0, 460.0), 1.0);
        feed(&mut scene, Some(e));
        assert!(!overlay_captures(true, &scene, &events));
        let e = events.mouse_input(ElementState::Released, MouseButton::Left);
        feed(&mut scene, e);

        assert_eq!(scene.grabbed(), None);
        assert!(overlay_captures(true, &scene, &events));
    }

    #[test]
    fn test_app_error_messages() {
        let err = AppError::Surface("no adapter".to_string());
        assert_eq!(err.to_string(), "Surface creation failed: no adapter");

        let err: AppError = RendererError::InitFailed("shader".to_string()).into();
        assert_eq!(err.to_string(), "Initialization failed: shader");
    }
}
