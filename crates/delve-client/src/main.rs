use std::process::ExitCode;

use anyhow::{Context, Result};

use delve_engine::coords::{Axis, Point};
use delve_engine::core::{ClientConfig, DrawCtx, ExitStatus, Game, GameClient, UpdateCtx};
use delve_engine::logging::{init_logging, LoggingConfig};
use delve_engine::render::{Color, GpuRenderer, RendererConfig};
use delve_engine::window::{WindowConfig, WinitWindow};

/// Steps the marker travels along one axis before rotating to the next.
const LEG_LENGTH: i32 = 16;

/// Demo game: a marker walks the lattice along X, then Y, then Z, and the
/// clear color tracks its progress through the current leg.
struct Demo {
    axis: Axis,
    step_in_leg: i32,
    origin: Point,
    marker: Point,
    previous: Point,
    calm: Color,
    alert: Color,
}

impl Demo {
    fn new() -> Self {
        Self {
            axis: Axis::X,
            step_in_leg: 0,
            origin: Point::zero(),
            marker: Point::zero(),
            previous: Point::zero(),
            calm: Color::from_srgb_u8(18, 22, 34),
            alert: Color::from_srgb_u8(96, 44, 38),
        }
    }

    fn next_axis(axis: Axis) -> Axis {
        match axis {
            Axis::X => Axis::Y,
            Axis::Y => Axis::Z,
            Axis::Z => Axis::X,
        }
    }

    /// Moves the marker one cell, turning onto the next axis at the end of a leg.
    fn advance(&mut self) {
        self.previous = self.marker;

        if self.step_in_leg == LEG_LENGTH {
            self.axis = Self::next_axis(self.axis);
            self.origin = self.marker;
            self.previous = self.marker;
            self.step_in_leg = 0;
            log::debug!("turning onto the {:?} axis at {}", self.axis, self.marker);
        }

        self.marker = self.marker + Point::from_axis(self.axis, 0, 0, 1);
        self.step_in_leg += 1;
    }

    /// Leg progress in `[0, 1]`, blended between the last two simulated states.
    fn progress(&self, interpolation: f64) -> f32 {
        let cur = self.marker.depth(self.axis) - self.origin.depth(self.axis);
        let prev = self.previous.depth(self.axis) - self.origin.depth(self.axis);
        // interpolation = 1 is the just-completed state, 0 the one before it.
        let blended = prev as f64 + (cur - prev) as f64 * interpolation;
        (blended / LEG_LENGTH as f64) as f32
    }
}

impl Game<GpuRenderer> for Demo {
    fn initialize(&mut self) -> Result<()> {
        log::info!("demo starting on the {:?} axis at {}", self.axis, self.marker);
        Ok(())
    }

    fn update(&mut self, ctx: &mut UpdateCtx) {
        if ctx.is_running_slowly {
            log::trace!("catching up at {}", ctx.simulation_time);
        }
        self.advance();
    }

    fn draw(&mut self, ctx: &mut DrawCtx<'_, GpuRenderer>) {
        if ctx.renderer.is_lost() {
            log::error!("renderer lost, shutting down");
            ctx.exit();
            return;
        }

        let t = self.progress(ctx.interpolation);
        let color = self.calm.lerp(self.alert, t);
        ctx.renderer.set_clear_color(color);
    }

    fn unload_content(&mut self) {
        log::info!("demo finished at {}", self.marker);
    }
}

fn client_config() -> ClientConfig {
    let config = ClientConfig::default();
    match std::env::var("DELVE_UPDATE_HZ") {
        Ok(raw) => match raw.trim().parse::<i32>() {
            Ok(hz) if hz > 0 => config.with_update_rate(hz),
            _ => {
                log::warn!("ignoring invalid DELVE_UPDATE_HZ={raw:?}");
                config
            }
        },
        Err(_) => config,
    }
}

fn run() -> Result<ExitStatus> {
    let mut window = WinitWindow::new(WindowConfig::default().title("delve").size(800.0, 600.0))
        .context("failed to open the main window")?;
    let mut renderer = GpuRenderer::new(window.handle(), RendererConfig::default())
        .context("failed to initialize the renderer")?;

    let mut game = Demo::new();
    let mut client = GameClient::new(&mut window, &mut renderer).with_config(client_config());
    Ok(client.run(&mut game))
}

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    match run() {
        Ok(status) => status.into(),
        Err(e) => {
            log::error!("{e:#}");
            ExitStatus::FatalError.into()
        }
    }
}
