use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use spincube_common::{ClearColor, SurfaceExtent};
use spincube_input::{DragButton, OrbitAction, OrbitController, PointerGesture};
use spincube_render::{
    Cube, DEFAULT_SPIN_STEP, FramePacer, FrameState, ModelSpin, Renderer, ViewConfig,
    ViewProjection,
};
use spincube_render_wgpu::{GpuContext, GpuInit, SurfaceErrorAction, WgpuRenderer};
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Scroll pixels treated as one wheel line.
const PIXELS_PER_LINE: f32 = 40.0;

#[derive(Parser)]
#[command(name = "spincube-desktop", about = "Spinning cube with an orbit camera")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Window width in logical pixels
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Cap the frame rate; 0 leaves pacing to vsync
    #[arg(long, default_value_t = 0.0)]
    fps: f64,

    /// Cube rotation per frame, in radians
    #[arg(long, default_value_t = DEFAULT_SPIN_STEP, allow_hyphen_values = true)]
    spin_step: f32,
}

/// Application state.
struct AppState {
    frame: FrameState,
    orbit: OrbitController,
    gesture: PointerGesture,
    pacer: FramePacer,
}

impl AppState {
    fn new(cli: &Cli) -> Result<Self> {
        let config = ViewConfig::default();
        // aspect is replaced once the window exists
        let vp = ViewProjection::new(1.0, &config);
        let orbit = OrbitController::new(&vp.orbit).context("invalid orbit camera options")?;

        Ok(Self {
            frame: FrameState::new(&vp, config, ModelSpin::new(cli.spin_step)),
            orbit,
            gesture: PointerGesture::new(),
            pacer: FramePacer::with_fps(cli.fps),
        })
    }

    fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        let button = match button {
            MouseButton::Left => DragButton::Primary,
            MouseButton::Right | MouseButton::Middle => DragButton::Secondary,
            _ => return,
        };
        if pressed {
            self.gesture.press(button);
        } else {
            self.gesture.release(button);
        }
    }

    fn handle_scroll(&mut self, delta: MouseScrollDelta) {
        let lines = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_LINE,
        };
        self.orbit.apply(OrbitAction::Zoom(lines));
    }
}

struct GpuApp {
    state: AppState,
    window_size: LogicalSize<f64>,
    window: Option<Arc<Window>>,
    renderer: Option<WgpuRenderer>,
    fatal: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(cli: &Cli) -> Result<Self> {
        Ok(Self {
            state: AppState::new(cli)?,
            window_size: LogicalSize::new(cli.width, cli.height),
            window: None,
            renderer: None,
            fatal: None,
        })
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("spincube")
            .with_inner_size(self.window_size);
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let scale = window.scale_factor();
        let client = window.inner_size().to_logical::<f64>(scale);
        let extent = SurfaceExtent::from_client(client.width, client.height, scale);

        let (ctx, target) = pollster::block_on(GpuContext::for_window(
            window.clone(),
            extent,
            &GpuInit::default(),
        ))?;
        let renderer = WgpuRenderer::new(ctx, target, &Cube::unit(), ClearColor::default())?;

        self.state.frame.set_aspect(extent.aspect());
        self.window = Some(window);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        tracing::error!("{err:#}");
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn draw_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(renderer) = &mut self.renderer else {
            return;
        };
        let now = Instant::now();
        if !self.state.pacer.is_due(now) {
            return;
        }

        if self.state.orbit.tick() {
            self.state.frame.set_view(self.state.orbit.view_matrix());
        }
        let uniforms = self.state.frame.advance();

        if let Err(err) = renderer.render(&uniforms) {
            match renderer.handle_surface_error(&err) {
                SurfaceErrorAction::Reconfigured => tracing::debug!("surface reconfigured: {err}"),
                SurfaceErrorAction::SkipFrame => tracing::warn!("frame skipped: {err}"),
                SurfaceErrorAction::Fatal => {
                    self.fail(event_loop, anyhow::anyhow!("surface error: {err}"));
                    return;
                }
            }
        }
        self.state.pacer.frame_drawn(now);
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init_gpu(event_loop) {
            self.fail(event_loop, err.context("GPU initialization failed"));
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                // minimized windows report 0x0; keep the old surface
                if new_size.width == 0 || new_size.height == 0 {
                    return;
                }
                let extent = SurfaceExtent::new(new_size.width, new_size.height);
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(extent);
                    self.state.frame.set_aspect(extent.aspect());
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                event_loop.exit();
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.state
                    .gesture
                    .set_pan_modifier(modifiers.state().shift_key());
            }
            WindowEvent::MouseInput {
                button,
                state: btn_state,
                ..
            } => {
                self.state
                    .handle_mouse_button(button, btn_state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let action = self
                    .state
                    .gesture
                    .moved(Vec2::new(position.x as f32, position.y as f32));
                self.state.orbit.apply(action);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.state.handle_scroll(delta);
            }
            WindowEvent::RedrawRequested => {
                self.draw_frame(event_loop);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &self.window else {
            return;
        };
        match self.state.pacer.next_due() {
            Some(deadline) if deadline > Instant::now() => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
            _ => {
                event_loop.set_control_flow(ControlFlow::Poll);
                window.request_redraw();
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("spincube-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(&cli)?;
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
