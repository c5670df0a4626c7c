use std::num::NonZeroU32;

use anyhow::{Context, Result, anyhow};
use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::{BootstrapConfig, RuntimeConfig};
use crate::coords::Viewport;
use crate::gpu::GlowBackend;
use crate::program::{RayTraceProgram, bootstrap};
use crate::render::{FullscreenQuad, prepare_state};
use crate::scene::SceneDescription;

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, bootstraps the ray tracer and blocks until the window
    /// is closed. A startup or draw failure ends the loop and is returned.
    pub fn run(
        config: RuntimeConfig,
        bootstrap: BootstrapConfig,
        scene: SceneDescription,
    ) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut state = AppState::new(config, bootstrap, scene);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Everything tied to the live GL context. Field order is drop order: GPU
/// objects are released explicitly, then surface, context and window go.
struct GlWindowState {
    program: Option<RayTraceProgram<GlowBackend>>,
    quad: Option<FullscreenQuad<glow::Buffer>>,
    viewport: Viewport,
    gl: GlowBackend,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
}

impl GlWindowState {
    fn draw(&self) -> Result<()> {
        if let Some(quad) = &self.quad {
            quad.draw(&self.gl, self.viewport).context("failed to draw frame")?;
        }
        self.surface
            .swap_buffers(&self.context)
            .context("failed to swap buffers")?;
        Ok(())
    }

    fn release(&mut self) {
        if let Some(quad) = self.quad.take() {
            quad.destroy(&self.gl);
        }
        if let Some(program) = self.program.take() {
            program.destroy(&self.gl);
        }
    }
}

struct AppState {
    config: RuntimeConfig,
    bootstrap: BootstrapConfig,
    scene: SceneDescription,

    gl: Option<GlWindowState>,
    failure: Option<anyhow::Error>,
}

impl AppState {
    fn new(config: RuntimeConfig, bootstrap: BootstrapConfig, scene: SceneDescription) -> Self {
        Self {
            config,
            bootstrap,
            scene,
            gl: None,
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, e: anyhow::Error) {
        log::error!("{e:#}");
        self.failure = Some(e);
        self.shutdown(event_loop);
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(mut gl) = self.gl.take() {
            gl.release();
        }
        event_loop.exit();
    }

    fn create_gl_window(&mut self, event_loop: &ActiveEventLoop) -> Result<GlWindowState> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(false);

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attrs))
            .build(event_loop, ConfigTemplateBuilder::new(), pick_config)
            .map_err(|e| anyhow!("failed to create window: {e}"))?;
        let window = window.context("display builder returned no window")?;

        let raw_handle = window
            .window_handle()
            .context("window has no native handle")?
            .as_raw();
        let display = gl_config.display();
        let context_attrs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(2, 1))))
            .with_profile(GlProfile::Compatibility)
            .build(Some(raw_handle));

        // SAFETY: the raw handle belongs to `window`, which outlives the context.
        let context = unsafe { display.create_context(&gl_config, &context_attrs) }
            .context("failed to create OpenGL 2.1 context")?;

        let surface_attrs = window
            .build_surface_attributes(Default::default())
            .context("failed to describe window surface")?;
        // SAFETY: as above.
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attrs) }
            .context("failed to create window surface")?;

        let context = context
            .make_current(&surface)
            .context("failed to make GL context current")?;

        if let Err(e) = surface.set_swap_interval(&context, SwapInterval::DontWait) {
            log::warn!("could not disable vsync: {e}");
        }

        // SAFETY: the context is current on this thread.
        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| display.get_proc_address(name))
        };

        let size = window.inner_size();
        log::info!(
            "created {}x{} window with {:?}",
            size.width,
            size.height,
            gl_config.api()
        );

        Ok(GlWindowState {
            program: None,
            quad: None,
            viewport: Viewport::from_physical(size),
            gl: GlowBackend::new(gl),
            surface,
            context,
            window,
        })
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let mut state = self.create_gl_window(event_loop)?;

        if state.viewport != self.scene.viewport() {
            log::info!(
                "drawable is {}x{}, adjusting scene viewport",
                state.viewport.width,
                state.viewport.height
            );
            self.scene.set_viewport(state.viewport);
        }

        prepare_state(&state.gl);

        let program = bootstrap(&state.gl, &self.bootstrap, &self.scene)
            .context("shader bootstrap failed")?;
        state.program = Some(program);

        match FullscreenQuad::new(&state.gl) {
            Ok(quad) => state.quad = Some(quad),
            Err(e) => {
                state.release();
                return Err(e).context("failed to create fullscreen quad");
            }
        }

        state.window.request_redraw();
        self.gl = Some(state);
        Ok(())
    }
}

/// Any config will do; the fewest samples is preferred since multisampling is
/// switched off anyway.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .min_by_key(|c| c.num_samples())
        .expect("glutin offers at least one GL config")
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gl.is_some() || self.failure.is_some() {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.gl.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::Resized(size) => {
                let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                else {
                    return;
                };
                state.surface.resize(&state.context, w, h);
                state.viewport = Viewport::from_physical(size);

                // The shader reads the drawable size from the scene uniforms.
                self.scene.set_viewport(state.viewport);
                let uploaded = state
                    .program
                    .as_ref()
                    .map_or(Ok(()), |p| p.upload_scene(&state.gl, &self.scene));
                if let Err(e) = uploaded {
                    let e = anyhow::Error::new(e).context("failed to re-upload scene");
                    self.fail(event_loop, e);
                    return;
                }
                state.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                if let Err(e) = state.draw() {
                    self.fail(event_loop, e);
                }
            }

            _ => {}
        }
    }
}
