//! winit event loop driving the [`Viewer`] on a [`Gpu`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{debug, error, info, trace};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Fullscreen, Window, WindowId},
};

use crate::config::Configuration;
use crate::error::Error;
use crate::photos::PhotoList;
use crate::render::gpu::{Gpu, GpuTexture};
use crate::viewer::{FrameState, Navigation, Viewer};

/// Frame cap used when neither the monitor nor the configuration supplies one.
pub const DEFAULT_REFRESH_RATE: u32 = 60;

/// Refresh rate in whole hertz from a monitor's millihertz report.
///
/// Missing or zero reports fall back to `fallback`, and a zero fallback to
/// [`DEFAULT_REFRESH_RATE`].
#[must_use]
pub fn refresh_rate_hz(millihertz: Option<u32>, fallback: u32) -> u32 {
    let fallback = if fallback == 0 {
        DEFAULT_REFRESH_RATE
    } else {
        fallback
    };
    match millihertz.map(|mhz| mhz.saturating_add(500) / 1000) {
        Some(hz) if hz > 0 => hz,
        _ => fallback,
    }
}

#[must_use]
pub fn frame_interval(hz: u32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(hz.max(1)))
}

/// Open the window and run the viewer until the user closes it.
///
/// # Errors
/// Returns [`Error::Render`] if the event loop, window or GPU cannot be
/// initialised, or if rendering fails irrecoverably.
pub fn run_viewer(photos: PhotoList<GpuTexture>, cfg: &Configuration) -> Result<(), Error> {
    info!(count = photos.len(), "starting viewer");
    let event_loop = EventLoop::new().map_err(|e| Error::Render(e.into()))?;
    let mut app = App::new(photos, cfg.clone());
    event_loop
        .run_app(&mut app)
        .map_err(|e| Error::Render(e.into()))?;
    app.failure.take().map_or(Ok(()), |e| Err(Error::Render(e)))
}

struct App {
    cfg: Configuration,
    pending: Option<PhotoList<GpuTexture>>,

    // window/gpu
    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    viewer: Option<Viewer<GpuTexture>>,

    // pacing
    frame_interval: Duration,
    next_frame: Instant,

    failure: Option<anyhow::Error>,
}

impl App {
    fn new(photos: PhotoList<GpuTexture>, cfg: Configuration) -> Self {
        Self {
            cfg,
            pending: Some(photos),
            window: None,
            gpu: None,
            viewer: None,
            frame_interval: frame_interval(DEFAULT_REFRESH_RATE),
            next_frame: Instant::now(),
            failure: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.cfg.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.cfg.window.width,
                self.cfg.window.height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );
        let monitor = window.current_monitor();
        if self.cfg.window.fullscreen {
            window.set_fullscreen(Some(Fullscreen::Borderless(monitor.clone())));
        }

        let hz = refresh_rate_hz(
            monitor.and_then(|m| m.refresh_rate_millihertz()),
            self.cfg.fallback_refresh_rate,
        );
        self.frame_interval = frame_interval(hz);
        info!(hz, "frame rate capped");

        let mut gpu = Gpu::new(window.clone(), self.cfg.background)?;
        let photos = self
            .pending
            .take()
            .context("photo list already handed to a viewer")?;
        let viewer = Viewer::open(photos, self.cfg.viewer_settings(), &mut gpu)
            .context("no photos to show")?;
        debug!(textures = gpu.live_textures(), "viewer ready");

        self.viewer = Some(viewer);
        self.gpu = Some(gpu);
        self.next_frame = Instant::now();
        window.request_redraw();
        self.window = Some(window);
        Ok(())
    }

    fn navigate(&mut self, nav: Navigation) {
        if let (Some(viewer), Some(gpu)) = (self.viewer.as_mut(), self.gpu.as_mut()) {
            viewer.navigate(nav, gpu);
        }
    }

    fn draw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(viewer), Some(gpu)) = (self.viewer.as_mut(), self.gpu.as_mut()) else {
            return;
        };
        #[allow(clippy::cast_possible_truncation)]
        let ui_scale = self.window.as_ref().map_or(1.0, |w| w.scale_factor() as f32);
        let result = {
            let quads = viewer.frame(gpu.size(), ui_scale);
            gpu.render(&quads)
        };
        if viewer.end_frame() == FrameState::Navigating {
            trace!(index = viewer.index(), "drew navigation frame");
        }
        if let Err(err) = result {
            error!(error = %err, "render failed");
            self.failure = Some(err);
            self.shutdown(event_loop);
        }
    }

    /// Release the current photo, thumbnails and list, then the GPU and window.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(gpu) = self.gpu.as_mut() {
            if let Some(viewer) = self.viewer.take() {
                viewer.close(gpu);
            }
            debug!(leaked = gpu.live_textures(), "gpu textures released");
        }
        self.gpu = None;
        self.window = None;
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            error!(error = %err, "viewer initialisation failed");
            self.failure = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(win) = &self.window else { return };
        if win.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::ArrowRight) => self.navigate(Navigation::Advance),
                    PhysicalKey::Code(KeyCode::ArrowLeft) => self.navigate(Navigation::Retreat),
                    PhysicalKey::Code(KeyCode::Escape) => self.shutdown(event_loop),
                    _ => {}
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size);
                }
            }
            WindowEvent::RedrawRequested => self.draw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(win) = &self.window else { return };
        let now = Instant::now();
        if now >= self.next_frame {
            win.request_redraw();
            self.next_frame = now + self.frame_interval;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}
