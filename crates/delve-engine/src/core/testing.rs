//! Scripted collaborators for exercising the game loop without a window or GPU.

use std::collections::VecDeque;

use anyhow::{bail, Result};

use crate::platform::Platform;
use crate::render::Renderer;
use crate::time::Time;
use crate::window::Window;

use super::game::{DrawCtx, Game, UpdateCtx};

/// Clock that starts at zero and advances by one scripted delta per query.
///
/// The first query (the loop's baseline) returns the start time; every later
/// query consumes the next delta, or repeats the last time once the script is
/// exhausted.
#[derive(Debug, Default)]
pub(crate) struct ScriptedPlatform {
    now: Time,
    deltas: VecDeque<Time>,
    pub queries: usize,
    pub sleeps: Vec<Time>,
}

impl ScriptedPlatform {
    pub fn new(deltas: impl IntoIterator<Item = Time>) -> Self {
        Self {
            deltas: deltas.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl Platform for ScriptedPlatform {
    fn current_time(&mut self) -> Time {
        if self.queries > 0 {
            if let Some(delta) = self.deltas.pop_front() {
                self.now += delta;
            }
        }
        self.queries += 1;
        self.now
    }

    fn sleep(&mut self, duration: Time) {
        self.sleeps.push(duration);
    }
}

/// Window that reports quit after a fixed number of message pumps.
#[derive(Debug, Default)]
pub(crate) struct ScriptedWindow {
    quit_after: usize,
    pub processed: usize,
    pub shown: bool,
}

impl ScriptedWindow {
    pub fn quit_after(frames: usize) -> Self {
        Self {
            quit_after: frames,
            ..Self::default()
        }
    }
}

impl Window for ScriptedWindow {
    fn show(&mut self) {
        self.shown = true;
    }

    fn process_messages(&mut self) {
        self.processed += 1;
    }

    fn did_user_quit(&self) -> bool {
        self.processed >= self.quit_after
    }
}

#[derive(Debug, Default)]
pub(crate) struct CountingRenderer {
    pub presents: usize,
}

impl Renderer for CountingRenderer {
    fn present(&mut self) {
        self.presents += 1;
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct UpdateCall {
    pub simulation_time: Time,
    pub delta_time: Time,
    pub running_slowly: bool,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct DrawCall {
    pub simulation_time: Time,
    pub interpolation: f64,
}

/// Game that records every hook invocation.
#[derive(Debug, Default)]
pub(crate) struct RecordingGame {
    pub fail_initialize: bool,
    pub fail_load: bool,
    pub exit_after_updates: Option<usize>,
    pub exit_after_draws: Option<usize>,

    pub initializes: usize,
    pub loads: usize,
    pub unloads: usize,
    pub updates: Vec<UpdateCall>,
    pub draws: Vec<DrawCall>,
}

impl<R> Game<R> for RecordingGame {
    fn initialize(&mut self) -> Result<()> {
        self.initializes += 1;
        if self.fail_initialize {
            bail!("scripted initialize failure");
        }
        Ok(())
    }

    fn load_content(&mut self) -> Result<()> {
        self.loads += 1;
        if self.fail_load {
            bail!("scripted load failure");
        }
        Ok(())
    }

    fn update(&mut self, ctx: &mut UpdateCtx) {
        self.updates.push(UpdateCall {
            simulation_time: ctx.simulation_time,
            delta_time: ctx.delta_time,
            running_slowly: ctx.is_running_slowly,
        });
        if self.exit_after_updates == Some(self.updates.len()) {
            ctx.exit();
        }
    }

    fn draw(&mut self, ctx: &mut DrawCtx<'_, R>) {
        self.draws.push(DrawCall {
            simulation_time: ctx.simulation_time,
            interpolation: ctx.interpolation,
        });
        if self.exit_after_draws == Some(self.draws.len()) {
            ctx.exit();
        }
    }

    fn unload_content(&mut self) {
        self.unloads += 1;
    }
}
