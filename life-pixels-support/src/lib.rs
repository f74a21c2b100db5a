#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod error;
mod raster;

pub use error::AnimateError;
pub use raster::{BACKGROUND_COLOR, CELL_COLOR, LINE_COLOR, rasterize};

use life_grid::{Random, Simulation, SimulationConfig};
use log::{error, info, warn};
use pixels::wgpu::Color;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, KeyEvent, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Cursor, CursorIcon, Window, WindowId};

const WINDOW_TITLE: &str = "Conway's Game of Life";
const WINDOW_WIDTH: f64 = 1200.0;
const WINDOW_HEIGHT: f64 = 800.0;
const TICK_PERIOD_STEP_MILLIS: i64 = 10;

/// Opens a window and runs `config`'s simulation in it until the window is
/// closed.
///
/// Keys: Space play/pause, N single step, R reset, A toggle auto reset,
/// Up/Down grid size, Right/Left tick period, Escape/Q/X quit.
pub fn animate(config: SimulationConfig) -> Result<(), AnimateError> {
    let simulation = Simulation::new(config, Random::new())?;
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut handler = AppEventHandler::new(simulation);
    event_loop.run_app(&mut handler)?;
    match handler.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct App {
    simulation: Simulation,
    window: Arc<Window>,
    pixels: Pixels<'static>,
    size: PhysicalSize<u32>,
    next_update: Instant,
}

impl App {
    fn new(event_loop: &ActiveEventLoop, simulation: Simulation) -> Result<Self, AnimateError> {
        let window = Arc::new(Self::build_window(event_loop)?);
        let pixels = Self::build_pixels(&window)?;
        Ok(Self {
            simulation,
            size: window.inner_size(),
            window,
            pixels,
            next_update: Instant::now(),
        })
    }

    fn build_window(event_loop: &ActiveEventLoop) -> Result<Window, AnimateError> {
        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .with_cursor(Cursor::Icon(CursorIcon::Crosshair))
            .with_visible(false);
        Ok(event_loop.create_window(window_attributes)?)
    }

    fn build_pixels(window: &Arc<Window>) -> Result<Pixels<'static>, AnimateError> {
        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        let pixels = PixelsBuilder::new(window_size.width, window_size.height, surface_texture)
            .clear_color(Color::WHITE)
            .build()?;
        Ok(pixels)
    }

    fn on_create(&mut self) {
        self.update_title();
        self.window.request_redraw();
        self.window.set_visible(true);
    }

    fn on_time_step(&mut self) -> Result<(), AnimateError> {
        if self.simulation.is_running() {
            self.simulation.tick()?;
            self.update_title();
            self.window.request_redraw();
        }

        self.next_update =
            next_tick_after(self.next_update, Instant::now(), self.simulation.tick_period());
        Ok(())
    }

    fn on_redraw(&mut self) -> Result<(), AnimateError> {
        let PhysicalSize { width, height } = self.size;
        let primitives = self.simulation.primitives(width, height)?;
        rasterize(self.pixels.frame_mut(), width, height, primitives);
        self.pixels.render()?;
        Ok(())
    }

    fn on_resize(&mut self, size: PhysicalSize<u32>) -> Result<(), AnimateError> {
        if size.width == 0 || size.height == 0 {
            warn!("Ignoring resize to {}x{}", size.width, size.height);
            return Ok(());
        }
        self.pixels.resize_surface(size.width, size.height)?;
        self.pixels.resize_buffer(size.width, size.height)?;
        self.size = size;
        self.window.request_redraw();
        Ok(())
    }

    fn on_key(&mut self, code: KeyCode) -> Result<(), AnimateError> {
        match code {
            KeyCode::Space => {
                if self.simulation.is_running() {
                    self.simulation.pause();
                } else {
                    self.simulation.play();
                    self.next_update = Instant::now() + self.simulation.tick_period();
                }
            }
            KeyCode::KeyN => {
                self.simulation.step_once()?;
            }
            KeyCode::KeyR => {
                self.simulation.reset()?;
            }
            KeyCode::KeyA => {
                let auto_repeat = self.simulation.toggle_auto_repeat();
                info!("Auto reset {}", if auto_repeat { "on" } else { "off" });
            }
            KeyCode::ArrowUp | KeyCode::ArrowDown => {
                let delta = if code == KeyCode::ArrowUp { 1 } else { -1 };
                let size = self.simulation.config().stepped_grid_size(delta);
                self.simulation.set_grid_size(size)?;
            }
            KeyCode::ArrowRight | KeyCode::ArrowLeft => {
                let delta = if code == KeyCode::ArrowRight {
                    TICK_PERIOD_STEP_MILLIS
                } else {
                    -TICK_PERIOD_STEP_MILLIS
                };
                let millis = self.simulation.config().stepped_tick_period(delta);
                if self.simulation.set_tick_period(millis) {
                    self.next_update = Instant::now() + self.simulation.tick_period();
                }
            }
            _ => return Ok(()),
        }
        self.update_title();
        self.window.request_redraw();
        Ok(())
    }

    fn update_title(&self) {
        let config = self.simulation.config();
        self.window.set_title(&format!(
            "{WINDOW_TITLE} | {} | {1}x{1} | {2} ms | auto reset {3}",
            self.simulation.status_text(),
            config.grid_size,
            config.tick_period_millis,
            if config.auto_repeat { "on" } else { "off" },
        ));
    }
}

/// First tick time after `now` on the schedule `scheduled + k * period`.
/// A zero period yields `now` instead of spinning.
fn next_tick_after(scheduled: Instant, now: Instant, period: Duration) -> Instant {
    if scheduled >= now {
        return scheduled;
    }
    if period.is_zero() {
        return now;
    }
    let behind = now - scheduled;
    let missed = behind.as_nanos().div_ceil(period.as_nanos());
    scheduled + period * missed as u32
}

struct AppEventHandler {
    simulation: Option<Simulation>,
    app: Option<App>,
    error: Option<AnimateError>,
}

impl AppEventHandler {
    fn new(simulation: Simulation) -> Self {
        Self {
            simulation: Some(simulation),
            app: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AnimateError) {
        error!("{err}");
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for AppEventHandler {
    fn new_events(&mut self, event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause
            && let Some(app) = self.app.as_mut()
            && let Err(err) = app.on_time_step()
        {
            self.fail(event_loop, err);
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(simulation) = self.simulation.take() else {
            return;
        };
        match App::new(event_loop, simulation) {
            Ok(mut app) => {
                app.on_create();
                self.app = Some(app);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(app) = self.app.as_mut() else {
            return;
        };
        let result = match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                Ok(())
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Released,
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape | KeyCode::KeyQ | KeyCode::KeyX => {
                    event_loop.exit();
                    Ok(())
                }
                _ => app.on_key(code),
            },
            WindowEvent::Resized(size) => app.on_resize(size),
            WindowEvent::RedrawRequested => app.on_redraw(),
            _ => Ok(()),
        };
        if let Err(err) = result {
            self.fail(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        match self.app.as_ref() {
            Some(app) if app.simulation.is_running() => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(app.next_update));
            }
            _ => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_tick_skips_missed_ticks() {
        let start = Instant::now();
        let period = Duration::from_millis(20);
        let now = start + Duration::from_millis(50);
        assert_eq!(next_tick_after(start, now, period), start + Duration::from_millis(60));
    }

    #[test]
    fn next_tick_on_schedule_is_now() {
        let start = Instant::now();
        let now = start + Duration::from_millis(40);
        assert_eq!(next_tick_after(start, now, Duration::from_millis(20)), now);
    }

    #[test]
    fn next_tick_in_future_is_kept() {
        let start = Instant::now();
        let scheduled = start + Duration::from_millis(30);
        assert_eq!(
            next_tick_after(scheduled, start, Duration::from_millis(20)),
            scheduled
        );
    }

    #[test]
    fn zero_period_does_not_spin() {
        let start = Instant::now();
        let now = start + Duration::from_millis(5);
        assert_eq!(next_tick_after(start, now, Duration::ZERO), now);
    }
}
