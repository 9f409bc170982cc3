use anyhow::Result;

use crate::time::Time;

/// Game-specific behavior plugged into `GameClient`.
///
/// Every hook has a default: init hooks succeed, the rest do nothing. `R` is
/// the renderer type the client draws with.
pub trait Game<R> {
    /// Sets up systems needed for first play.
    fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    /// Loads assets. Runs after `initialize`, before the main loop.
    fn load_content(&mut self) -> Result<()> {
        Ok(())
    }

    /// Advances the simulation by exactly `ctx.delta_time`.
    ///
    /// May be called several times in a row while the simulation catches up
    /// with wall time.
    fn update(&mut self, ctx: &mut UpdateCtx) {
        let _ = ctx;
    }

    /// Renders the current state. `ctx.interpolation` is `1.0` at the
    /// just-completed simulation state and approaches `0.0` as the next step
    /// becomes due.
    fn draw(&mut self, ctx: &mut DrawCtx<'_, R>) {
        let _ = ctx;
    }

    /// Releases what `load_content` acquired. Called once, after the loop.
    fn unload_content(&mut self) {}
}

/// Per-step context passed to [`Game::update`].
#[derive(Debug)]
pub struct UpdateCtx {
    /// Simulation time at the start of this step.
    pub simulation_time: Time,

    /// Fixed step length.
    pub delta_time: Time,

    /// True for every step after the first within one outer iteration.
    pub is_running_slowly: bool,

    exit_requested: bool,
}

impl UpdateCtx {
    pub(crate) fn new(simulation_time: Time, delta_time: Time, is_running_slowly: bool) -> Self {
        Self {
            simulation_time,
            delta_time,
            is_running_slowly,
            exit_requested: false,
        }
    }

    /// Stops the main loop; it exits before the next frame starts.
    pub fn exit(&mut self) {
        self.exit_requested = true;
    }

    pub(crate) fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

/// Per-frame context passed to [`Game::draw`].
pub struct DrawCtx<'a, R> {
    pub simulation_time: Time,

    /// Fraction in `(0, 1]`; see [`Game::draw`].
    pub interpolation: f64,

    pub renderer: &'a mut R,

    exit_requested: bool,
}

impl<'a, R> DrawCtx<'a, R> {
    pub(crate) fn new(simulation_time: Time, interpolation: f64, renderer: &'a mut R) -> Self {
        Self {
            simulation_time,
            interpolation,
            renderer,
            exit_requested: false,
        }
    }

    /// Stops the main loop; it exits before the next frame starts.
    pub fn exit(&mut self) {
        self.exit_requested = true;
    }

    pub(crate) fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}
