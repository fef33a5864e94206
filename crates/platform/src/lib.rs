//! Platform layer: window, event loop and per-frame input handling.
//!
//! The viewer owns all per-run state (camera, input, GPU state) and the event loop
//! drives it. Rendering happens on every `RedrawRequested`, which is re-requested
//! from `about_to_wait`, with vsync pacing the loop.

pub mod input;

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{Context, Result, anyhow};
use asset::Mesh;
use corelib::{
    Vec3,
    camera::{Camera, Projection},
};
use renderer::{GpuState, RenderSettings, Vertex};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowId},
};

use crate::input::{InputState, apply_fly_controls};

pub const WINDOW_TITLE: &str = "Monkey Model";
pub const FIELD_OF_VIEW_DEG: f32 = 65.0;
pub const NEAR_PLANE: f32 = 0.001;
pub const FAR_PLANE: f32 = 100.0;
pub const START_POSITION: Vec3 = Vec3::new(0.0, 0.0, 4.0);

/// Everything the viewer needs besides the mesh.
#[derive(Clone, Debug)]
pub struct ViewerConfig {
    pub backends: wgpu::Backends,
    pub width: u32,
    pub height: u32,
    pub show_fps: bool,
    pub render: RenderSettings,
}

/// Open the window and run until it is closed or Escape is pressed.
pub fn run_viewer(config: ViewerConfig, mesh: &Mesh) -> Result<()> {
    let vertices = renderer::vertices_from_mesh(mesh).context("Mesh cannot be drawn")?;

    let event_loop = EventLoop::new().map_err(|e| anyhow!("Failed to create event loop: {e:?}"))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut viewer = Viewer::new(config, vertices);
    event_loop
        .run_app(&mut viewer)
        .map_err(|e| anyhow!("Event loop error: {e:?}"))?;

    match viewer.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct Viewer {
    config: ViewerConfig,
    vertices: Vec<Vertex>,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    camera: Camera,
    projection: Projection,
    input: InputState,
    last_frame: Option<Instant>,
    fps: FpsCounter,
    error: Option<anyhow::Error>,
}

impl Viewer {
    fn new(config: ViewerConfig, vertices: Vec<Vertex>) -> Self {
        let aspect = config.width.max(1) as f32 / config.height.max(1) as f32;
        Self {
            config,
            vertices,
            window: None,
            gpu: None,
            camera: Camera::new(START_POSITION),
            projection: Projection::new(FIELD_OF_VIEW_DEG, NEAR_PLANE, FAR_PLANE, aspect),
            input: InputState::default(),
            last_frame: None,
            fps: FpsCounter::new(Duration::from_secs(1)),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| anyhow!("Failed to create window: {e}"))?,
        );
        let size = window.inner_size();
        log::info!("Window created: {}x{}", size.width, size.height);

        let gpu = pollster::block_on(GpuState::new(
            window.clone(),
            self.config.backends,
            &self.vertices,
            self.config.render,
        ))?;
        self.projection.resize(size.width, size.height);

        set_grab(&window, &mut self.input, true);
        window.request_redraw();

        self.gpu = Some(gpu);
        self.window = Some(window);
        self.last_frame = Some(Instant::now());
        Ok(())
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        match event.state {
            ElementState::Pressed => {
                if code == KeyCode::Escape {
                    log::info!("Escape pressed. Exiting event loop.");
                    event_loop.exit();
                    return;
                }
                if code == KeyCode::KeyM && !event.repeat {
                    if let Some(window) = &self.window {
                        let grab = !self.input.is_grabbed();
                        set_grab(window, &mut self.input, grab);
                    }
                }
                self.input.press(code);
            }
            ElementState::Released => self.input.release(code),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt_ms = self
            .last_frame
            .replace(now)
            .map(|prev| (now - prev).as_secs_f32() * 1000.0)
            .unwrap_or(0.0);

        apply_fly_controls(&mut self.camera, &mut self.input, dt_ms);

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        match gpu.render(&self.camera, &self.projection) {
            Ok(()) => {}
            Err(e) if GpuState::is_surface_lost(&e) => {
                log::warn!("Surface lost/outdated ({e}); reconfiguring.");
                gpu.recreate_surface();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory. Exiting.");
                self.error = Some(anyhow!("GPU out of memory"));
                event_loop.exit();
                return;
            }
            Err(e) => log::warn!("Dropped frame: {e}"),
        }

        if let Some(fps) = self.fps.tick(now) {
            if self.config.show_fps {
                if let Some(window) = &self.window {
                    window.set_title(&format!("{WINDOW_TITLE} - {fps:.0} fps"));
                }
            }
        }
    }
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            log::error!("Initialisation failed: {err:#}");
            self.error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested. Exiting event loop.");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                log::info!("Resized: {}x{}", new_size.width, new_size.height);
                self.projection.resize(new_size.width, new_size.height);
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::Focused(false) => self.input.clear(),
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, event),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.input.add_mouse_delta(dx, dy);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Lock (or confine, where locking is unsupported) and hide the cursor.
fn set_grab(window: &Window, input: &mut InputState, grab: bool) {
    let result = if grab {
        window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
    } else {
        window.set_cursor_grab(CursorGrabMode::None)
    };
    match result {
        Ok(()) => {
            window.set_cursor_visible(!grab);
            input.set_grabbed(grab);
            log::debug!("Mouse grab: {grab}");
        }
        Err(err) => log::warn!("Could not change cursor grab: {err}"),
    }
}

/// Counts frames and reports the average rate once per window.
#[derive(Debug)]
struct FpsCounter {
    window: Duration,
    started: Option<Instant>,
    frames: u32,
}

impl FpsCounter {
    fn new(window: Duration) -> Self {
        Self {
            window,
            started: None,
            frames: 0,
        }
    }

    fn tick(&mut self, now: Instant) -> Option<f32> {
        let started = *self.started.get_or_insert(now);
        self.frames += 1;
        let elapsed = now.duration_since(started);
        if elapsed < self.window {
            return None;
        }
        let fps = self.frames as f32 / elapsed.as_secs_f32();
        self.started = Some(now);
        self.frames = 0;
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_reported_once_per_window() {
        let mut fps = FpsCounter::new(Duration::from_secs(1));
        let t0 = Instant::now();
        assert_eq!(fps.tick(t0), None);
        for i in 1..60 {
            assert_eq!(fps.tick(t0 + Duration::from_millis(i * 10)), None);
        }
        let rate = fps.tick(t0 + Duration::from_secs(1)).expect("window elapsed");
        assert!((rate - 61.0).abs() < 1e-3);
        assert_eq!(fps.tick(t0 + Duration::from_millis(1010)), None);
    }

    #[test]
    fn viewer_starts_outside_the_model() {
        let config = ViewerConfig {
            backends: wgpu::Backends::all(),
            width: 1280,
            height: 720,
            show_fps: false,
            render: RenderSettings::default(),
        };
        let viewer = Viewer::new(config, Vec::new());
        assert_eq!(viewer.camera.position, START_POSITION);
        assert!((viewer.projection.aspect - 16.0 / 9.0).abs() < 1e-5);
        assert!(viewer.gpu.is_none());
    }
}
