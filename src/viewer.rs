//! Standalone window backed by winit.
//!
//! ```no_run
//! # use sphere_stage::Viewer;
//! Viewer::builder()
//!     .with_title("Sphere")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    engine::{frame::FrameDriver, Stage},
    error::StageError,
    gpu::render_context::RenderContext,
    options::Options,
    renderer::GpuRenderer,
    util::frame_timing::FrameTiming,
    viewport::ViewportSize,
    InputEvent, MouseButton,
};

/// Frames between FPS log lines.
const FPS_LOG_INTERVAL: u64 = 300;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Options,
    title: Option<String>,
}

impl ViewerBuilder {
    /// Create a builder with default options; the title comes from
    /// `display.title`.
    fn new() -> Self {
        Self {
            options: Options::default(),
            title: None,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        let title = self
            .title
            .unwrap_or_else(|| self.options.display.title.clone());
        Viewer {
            options: self.options,
            title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window showing the demo scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed or a quit key is pressed.
    pub fn run(self) -> Result<(), StageError> {
        let event_loop =
            EventLoop::new().map_err(|e| StageError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = ViewerApp {
            window: None,
            stage: None,
            driver: FrameDriver::new(),
            frame_timing: FrameTiming::new(),
            options: Some(self.options),
            title: self.title,
            init_error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| StageError::Viewer(e.to_string()))?;
        app.init_error.map_or(Ok(()), Err)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    stage: Option<Stage<GpuRenderer>>,
    driver: FrameDriver,
    frame_timing: FrameTiming,
    options: Option<Options>,
    title: String,
    init_error: Option<StageError>,
}

impl ViewerApp {
    fn create_stage(
        window: &Arc<Window>,
        options: Options,
    ) -> Result<Stage<GpuRenderer>, StageError> {
        let viewport = ViewportSize::from(window.inner_size());
        let context = pollster::block_on(RenderContext::new(
            window.clone(),
            (viewport.width, viewport.height),
        ))?;
        let renderer = GpuRenderer::new(context, options.display.clear_color)?;
        Ok(Stage::new(renderer, viewport, options, Instant::now()))
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(stage)) = (&self.window, &mut self.stage)
        else {
            return;
        };

        match self.driver.on_refresh(stage, &**window, Instant::now()) {
            Ok(_) => {}
            Err(StageError::Surface(
                wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost,
            )) => {
                log::debug!("surface lost, reconfiguring");
                stage.renderer().reconfigure();
            }
            Err(e) => log::error!("render error: {e}"),
        }

        self.frame_timing.end_frame();
        if self.frame_timing.frames() % FPS_LOG_INTERVAL == 0 {
            log::debug!("{:.1} fps", self.frame_timing.fps());
        }

        if stage.quit_requested() {
            self.driver.cancel_token().cancel();
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(options) = self.options.take() else {
            return;
        };

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                self.init_error = Some(StageError::Viewer(e.to_string()));
                event_loop.exit();
                return;
            }
        };

        match Self::create_stage(&window, options) {
            Ok(stage) => {
                self.driver.start(&*window);
                self.window = Some(window);
                self.stage = Some(stage);
            }
            Err(e) => {
                log::error!("failed to initialize stage: {e}");
                self.init_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            self.driver.cancel_token().cancel();
            event_loop.exit();
            return;
        }

        if matches!(event, WindowEvent::RedrawRequested) {
            self.redraw(event_loop);
            return;
        }

        let Some(stage) = &mut self.stage else {
            return;
        };

        match event {
            WindowEvent::Resized(size) => {
                stage.on_resize(size.width, size.height);
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let _ = stage.handle_input(InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                let _ = stage.handle_input(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll_delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                let _ = stage.handle_input(InputEvent::Scroll {
                    delta: scroll_delta,
                });
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                let _ = stage.handle_input(InputEvent::ModifiersChanged {
                    shift: modifiers.state().shift_key(),
                });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let _ = stage.handle_key(&format!("{code:?}"));
                if stage.quit_requested() {
                    self.driver.cancel_token().cancel();
                    event_loop.exit();
                }
            }

            _ => (),
        }
    }
}
