//! CubeStream - a rotating wireframe cube over a drifting particle field,
//! scored by a procedurally synthesized chiptune loop.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use cubestream::audio::CpalChannel;
use cubestream::cli::Args;
use cubestream::context::SimulationContext;
use cubestream::params::{AudioDeviceConfig, RenderConfig};
use cubestream::rendering::{RenderError, RenderSystem};
use cubestream::scene::{InputEvent, Key, SceneState};
use cubestream::timing::FrameLimiter;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation
    context: SimulationContext<CpalChannel>,
    pending: Vec<InputEvent>,
    limiter: FrameLimiter,

    render_config: RenderConfig,

    /// Set when startup or rendering fails for good
    fatal: Option<anyhow::Error>,
}

impl App {
    fn new(args: &Args) -> Self {
        let render_config = RenderConfig::default();
        let mood = args.parse_mood();
        log::info!("Mood: {}", mood.name());
        let mood_params = mood.params(&render_config);

        let channel = CpalChannel::open(&AudioDeviceConfig::default());
        let context =
            SimulationContext::new(render_config.clone(), &mood_params, channel, rand::random());

        Self {
            window: None,
            render_system: None,
            context,
            pending: Vec::new(),
            limiter: FrameLimiter::new(render_config.target_fps),
            render_config,
            fatal: None,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title(self.render_config.title)
            .with_resizable(false)
            .with_inner_size(LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );

        let logical_size = (
            self.render_config.window_width,
            self.render_config.window_height,
        );
        let render_system: Result<RenderSystem, RenderError> =
            pollster::block_on(RenderSystem::new(Arc::clone(&window), logical_size));
        let render_system = render_system.context("failed to initialize renderer")?;

        self.window = Some(window);
        self.render_system = Some(render_system);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.fatal = Some(error);
        event_loop.exit();
    }

    /// Run a single frame and pace it
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(render_system)) = (&self.window, &mut self.render_system) else {
            return;
        };

        let events = std::mem::take(&mut self.pending);
        match self.context.frame(events, render_system) {
            Ok(SceneState::Running) => {}
            Ok(SceneState::Stopped) => {
                log::info!(
                    "Stopped after {} frames",
                    self.context.scene().frames_presented()
                );
                event_loop.exit();
                return;
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = window.inner_size();
                render_system.resize(size.width, size.height);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, anyhow::anyhow!("GPU out of memory"));
                return;
            }
            Err(e) => log::warn!("Dropped frame: {:?}", e),
        }

        self.limiter.tick();
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        if let Err(e) = self.create_window(event_loop) {
            self.fail(event_loop, e);
            return;
        }

        log::info!("CubeStream is running, press ESC to quit");
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.pending.push(InputEvent::Quit),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key,
                        ..
                    },
                ..
            } => {
                let key = match physical_key {
                    PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
                    _ => Key::Other,
                };
                self.pending.push(InputEvent::KeyDown(key));
            }
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("CubeStream starting");

    let mut app = App::new(&args);
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
