use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use rod_viewer::cli::Cli;
use rod_viewer::render::{render_scene, SurfaceRenderer};
use rod_viewer::{demo_model, Model, ViewerConfig, ViewerSession, Viewport};

const FPS_UPDATE_INTERVAL: f32 = 1.0;

struct App {
    cli: Cli,
    session: ViewerSession,
    window: Option<Arc<Window>>,
    renderer: Option<SurfaceRenderer>,
    last_frame_time: Instant,
    frame_count: u32,
    fps_update_timer: f32,
}

impl App {
    fn new(cli: Cli, session: ViewerSession) -> Self {
        Self {
            cli,
            session,
            window: None,
            renderer: None,
            last_frame_time: Instant::now(),
            frame_count: 0,
            fps_update_timer: 0.0,
        }
    }

    fn update_fps(&mut self, delta: f32) {
        self.frame_count += 1;
        self.fps_update_timer += delta;

        if self.fps_update_timer >= FPS_UPDATE_INTERVAL {
            let fps = self.frame_count as f32 / self.fps_update_timer;
            log::debug!(
                "FPS: {:.1}, orbit angle {:.1}°",
                fps,
                self.session.model().preview_camera_angle
            );
            self.frame_count = 0;
            self.fps_update_timer = 0.0;
        }
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;
        self.update_fps(delta);

        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };

        // Orbit update happens right before the frame is drawn
        self.session.tick();
        let frame = render_scene(
            self.session.scene(),
            self.session.camera(),
            self.session.viewport(),
            self.session.background(),
        );

        let label = self.session.label();
        let label = (!self.cli.no_ui && label.visible).then_some(label);
        if let Err(e) = renderer.render(window, &frame, label) {
            log::error!("Render error: {:#}", e);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("Rod Viewer")
                .with_inner_size(winit::dpi::LogicalSize::new(self.cli.width, self.cli.height)),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(SurfaceRenderer::new(window.clone())) {
            Ok(r) => r,
            Err(e) => {
                log::error!("Failed to initialize renderer: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        let (width, height) = renderer.dimensions();
        self.session.resize(Viewport::new(width, height));
        self.window = Some(window);
        self.renderer = Some(renderer);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                    let (width, height) = renderer.dimensions();
                    self.session.resize(Viewport::new(width, height));
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let pointer = Vec2::new(position.x as f32, position.y as f32);
                if let Some(hit) = self.session.pointer_moved(pointer) {
                    log::trace!("Pointer over {:?} at {:.2}", hit.part, hit.distance);
                }
            }
            WindowEvent::CursorLeft { .. } => self.session.pointer_left(),
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter())).init();

    let config = ViewerConfig::load(cli.config.as_deref())?;
    let model = match &cli.model {
        Some(path) => Model::load(path)?,
        None => {
            log::info!("No model given, showing the demo model");
            demo_model()
        }
    };

    let session = ViewerSession::new(model, &config, Viewport::new(cli.width, cli.height))
        .context("Model failed validation")?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli, session);

    log::info!("Rod Viewer - hover a part to identify it, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
