//! Simulation builder and runner

use crate::canvas::Canvas;
use crate::config::AppConfig;
use crate::controls::{ControlOutcome, Controls};
use crate::error::RunError;
use crate::field::StarField;
use crate::gpu::Presenter;
use crate::input::Input;
use crate::particle::Bounds;
use crate::primitives::{DrawPrimitive, Rgb};
use crate::time::FrameClock;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

#[cfg(feature = "egui")]
use crate::gpu::overlay::PanelOverlay;
#[cfg(feature = "egui")]
use crate::panel::ControlPanel;

/// The star travel simulation.
///
/// Use method chaining to configure, then call `.run()` to start.
///
/// ```ignore
/// StarTravel::new()
///     .with_star_count(500)
///     .with_seed(7)
///     .run()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct StarTravel {
    config: AppConfig,
}

impl StarTravel {
    /// Create a simulation with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the field (and window) size in pixels.
    pub fn with_bounds(mut self, width: u32, height: u32) -> Self {
        self.config.field.bounds = Bounds::new(width, height);
        self
    }

    /// Set the initial number of stars.
    pub fn with_star_count(mut self, count: u32) -> Self {
        self.config.frame.star_count = count;
        self
    }

    /// Seed the RNG for a reproducible session.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.field.seed = Some(seed);
        self
    }

    /// Draw every star in `color` instead of a random one.
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.config.field.color = Some(color);
        self
    }

    /// Set the target ticks per second.
    pub fn with_tick_rate(mut self, rate: f32) -> Self {
        self.config.tick_rate = rate;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the simulation. This blocks until the window is closed.
    pub fn run(self) -> Result<(), RunError> {
        self.config.validate()?;

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self.config);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct App {
    config: AppConfig,
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    field: StarField,
    canvas: Canvas,
    controls: Controls,
    input: Input,
    clock: FrameClock,
    primitives: Vec<DrawPrimitive>,
    title: String,
    #[cfg(feature = "egui")]
    overlay: Option<PanelOverlay>,
    #[cfg(feature = "egui")]
    panel: ControlPanel,
    /// Fatal error raised inside the event loop, returned from `run`.
    error: Option<RunError>,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let bounds = config.field.bounds;
        let controls = Controls::new(config.frame);
        let field = StarField::new(
            config.field,
            controls.config().star_count as usize,
            bounds.center(),
        );

        Self {
            window: None,
            presenter: None,
            canvas: Canvas::new(bounds.width, bounds.height),
            primitives: Vec::with_capacity(field.len() * 2),
            field,
            controls,
            input: Input::new(),
            clock: FrameClock::new(config.tick_rate),
            title: String::new(),
            #[cfg(feature = "egui")]
            overlay: None,
            #[cfg(feature = "egui")]
            panel: ControlPanel::new(),
            error: None,
            config,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RunError> {
        let bounds = self.field.bounds();
        let window_attrs = Window::default_attributes()
            .with_title(self.config.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(bounds.width, bounds.height))
            .with_resizable(false);

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let presenter = pollster::block_on(Presenter::new(
            window.clone(),
            bounds.width,
            bounds.height,
        ))?;

        let size = window.inner_size();
        self.input.set_window_size(size.width, size.height);

        #[cfg(feature = "egui")]
        {
            self.overlay = Some(PanelOverlay::new(
                presenter.device(),
                presenter.surface_format(),
                &window,
            ));
        }

        log::info!(
            "started {}x{} field with {} stars at {} ticks/s",
            bounds.width,
            bounds.height,
            self.field.len(),
            self.config.tick_rate
        );

        self.clock = FrameClock::new(self.config.tick_rate);
        self.presenter = Some(presenter);
        self.window = Some(window);
        Ok(())
    }

    /// Advance the field by one tick and rasterize it.
    fn step(&mut self, outcome: ControlOutcome) {
        let config = *self.controls.config();
        let bounds = self.field.bounds();
        let pointer = self.input.pointer_on(bounds.width, bounds.height);
        let origin = self.field.origin(config.origin_mode, pointer);

        if outcome.star_count_changed {
            self.field.reconcile(config.star_count as usize, origin);
        }
        self.field.update(&config, origin);

        self.primitives.clear();
        self.field.render_into(&config, &mut self.primitives);
        self.canvas.clear(Rgb::BLACK);
        self.canvas.draw_all(&self.primitives);

        if outcome.snapshot {
            self.snapshot();
        }
    }

    fn snapshot(&self) {
        let path = format!("startravel-{}.png", self.clock.frame());
        match self.canvas.save_png(&path) {
            Ok(()) => log::info!("saved snapshot to {}", path),
            Err(err) => log::warn!("failed to save snapshot {}: {}", path, err),
        }
    }

    fn update_title(&mut self) {
        let title = format!(
            "{} - {} stars - {:.0} FPS",
            self.config.title,
            self.field.len(),
            self.clock.fps()
        );
        if title != self.title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.title = title;
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let due = self.clock.is_due(now);

        let mut outcome = ControlOutcome::default();
        if due {
            self.clock.tick(now);
            outcome = self.controls.handle_input(&self.input);
            self.input.begin_frame();
        }

        #[cfg(feature = "egui")]
        if let (Some(overlay), Some(window)) = (&mut self.overlay, &self.window) {
            outcome.merge(overlay.update(window, &self.panel, &mut self.controls));
        }

        if outcome.quit {
            log::info!("quit requested");
            event_loop.exit();
            return;
        }

        if due {
            self.step(outcome);
            self.update_title();
        } else {
            // Panel clicks between ticks still take effect
            if outcome.star_count_changed {
                let count = self.controls.config().star_count as usize;
                self.field.reconcile(count, self.field.center());
            }
            if outcome.snapshot {
                self.snapshot();
            }
        }

        self.present(event_loop);
    }

    fn present(&mut self, event_loop: &ActiveEventLoop) {
        let Some(presenter) = self.presenter.as_mut() else {
            return;
        };

        #[cfg(feature = "egui")]
        let result = match self.overlay.as_mut() {
            Some(overlay) => {
                let size = [presenter.config.width, presenter.config.height];
                presenter.present_with(self.canvas.pixels(), |device, queue, encoder, view| {
                    overlay.paint(device, queue, encoder, view, size);
                })
            }
            None => presenter.present(self.canvas.pixels()),
        };
        #[cfg(not(feature = "egui"))]
        let result = presenter.present(self.canvas.pixels());

        handle_surface_result(presenter, result, event_loop);
    }
}

fn handle_surface_result(
    presenter: &mut Presenter,
    result: Result<(), wgpu::SurfaceError>,
    event_loop: &ActiveEventLoop,
) {
    match result {
        Ok(()) => {}
        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
            log::warn!("surface lost, reconfiguring");
            presenter.reconfigure();
        }
        Err(wgpu::SurfaceError::OutOfMemory) => {
            log::error!("surface out of memory");
            event_loop.exit();
        }
        Err(e) => log::warn!("render error: {:?}", e),
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            self.error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        #[cfg(feature = "egui")]
        let consumed = match (&mut self.overlay, &self.window) {
            (Some(overlay), Some(window)) => overlay.on_window_event(window, &event),
            _ => false,
        };
        #[cfg(not(feature = "egui"))]
        let consumed = false;

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                self.input
                    .set_window_size(physical_size.width, physical_size.height);
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            other => {
                if !consumed {
                    self.input.handle_event(&other);
                }
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.clock.is_due(Instant::now()) {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.next_deadline()));
    }
}
