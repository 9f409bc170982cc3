use anyhow::Result;

use crate::platform::{Platform, SystemPlatform};
use crate::render::Renderer;
use crate::time::Time;
use crate::window::Window;

use super::config::{self, ClientConfig};
use super::game::{DrawCtx, Game, UpdateCtx};
use super::stats::LoopStats;
use super::status::ExitStatus;

/// Drives a [`Game`] with a fixed simulation step and a free-running render.
///
/// Wall time is accumulated and paid out as whole `update_frequency` steps, so
/// simulation time is independent of frame rate. Per-frame elapsed time is
/// clamped (250 ms by default) to keep a slow simulator from falling further
/// behind on every frame.
///
/// The window and renderer are borrowed for the client's lifetime; the
/// platform clock is owned.
pub struct GameClient<'a, W, R, P = SystemPlatform>
where
    W: Window,
    R: Renderer,
    P: Platform,
{
    window: &'a mut W,
    renderer: &'a mut R,
    platform: P,
    config: ClientConfig,
    is_game_running: bool,
    is_running_slowly: bool,
    stats: LoopStats,
}

impl<'a, W, R> GameClient<'a, W, R>
where
    W: Window,
    R: Renderer,
{
    pub fn new(window: &'a mut W, renderer: &'a mut R) -> Self {
        Self::with_platform(window, renderer, SystemPlatform::new())
    }
}

impl<'a, W, R, P> GameClient<'a, W, R, P>
where
    W: Window,
    R: Renderer,
    P: Platform,
{
    pub fn with_platform(window: &'a mut W, renderer: &'a mut R, platform: P) -> Self {
        Self {
            window,
            renderer,
            platform,
            config: ClientConfig::default(),
            is_game_running: false,
            is_running_slowly: false,
            stats: LoopStats::default(),
        }
    }

    /// Replaces the loop configuration. Panics on a non-positive step.
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        config.assert_valid();
        self.config = config;
        self
    }

    /// Sets how many times per second `update` is called.
    ///
    /// Panics when `updates_per_second <= 0`.
    pub fn set_update_frequency(&mut self, updates_per_second: i32) {
        self.config.update_frequency = config::step_for_rate(updates_per_second);
        log::trace!("setting the update frequency to {}", self.config.update_frequency);
    }

    pub fn update_frequency(&self) -> Time {
        self.config.update_frequency
    }

    pub fn set_maximum_sleep_skew(&mut self, skew: Time) {
        assert!(!skew.is_negative(), "sleep skew must not be negative (got {skew})");
        self.config.maximum_sleep_skew = skew;
    }

    pub fn maximum_sleep_skew(&self) -> Time {
        self.config.maximum_sleep_skew
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn is_game_running(&self) -> bool {
        self.is_game_running
    }

    /// Whether the most recent update was a catch-up step.
    pub fn is_running_slowly(&self) -> bool {
        self.is_running_slowly
    }

    /// Asks the main loop to stop at the top of its next iteration.
    pub fn stop(&mut self) {
        self.is_game_running = false;
    }

    pub fn stats(&self) -> &LoopStats {
        &self.stats
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Starts the game and blocks until the player quits.
    ///
    /// Returns [`ExitStatus::FatalError`] without entering the loop (and
    /// without calling `unload_content`) when client initialization,
    /// `initialize` or `load_content` fails.
    pub fn run<G>(&mut self, game: &mut G) -> ExitStatus
    where
        G: Game<R> + ?Sized,
    {
        // Show the window before subsystems or resources come up.
        self.window.show();

        if let Err(err) = self.initialize_client() {
            log::error!("client initialization failed: {err:#}");
            return ExitStatus::FatalError;
        }

        if let Err(err) = game.initialize() {
            log::error!("game initialization failed: {err:#}");
            return ExitStatus::FatalError;
        }

        log::info!("loading the game's content");
        if let Err(err) = game.load_content() {
            log::error!("content loading failed: {err:#}");
            return ExitStatus::FatalError;
        }

        self.run_main_game_loop(game);

        log::info!("unloading the game's content");
        game.unload_content();
        ExitStatus::Ok
    }

    fn initialize_client(&mut self) -> Result<()> {
        log::debug!(
            "initializing the game client (step {}, sleep skew {})",
            self.config.update_frequency,
            self.config.maximum_sleep_skew
        );
        self.stats = LoopStats::default();
        self.is_running_slowly = false;
        Ok(())
    }

    fn run_main_game_loop<G>(&mut self, game: &mut G)
    where
        G: Game<R> + ?Sized,
    {
        log::info!("entering the main game loop");
        self.is_game_running = true;

        let step = self.config.update_frequency;
        let mut simulation_time = Time::ZERO;
        let mut accumulated_time = Time::ZERO;
        let mut system_time = self.platform.current_time();

        while self.is_game_running && !self.window.did_user_quit() {
            // Drain OS messages before simulating.
            self.window.process_messages();

            let new_time = self.platform.current_time();
            let mut frame_time = new_time - system_time;
            system_time = new_time;

            if frame_time.is_negative() {
                log::warn!("clock went backwards by {}, ignoring", -frame_time);
                frame_time = Time::ZERO;
            }

            if frame_time > self.config.max_frame_time {
                log::debug!(
                    "frame took {}, clamping to {}",
                    frame_time,
                    self.config.max_frame_time
                );
                frame_time = self.config.max_frame_time;
                self.stats.clamped_frames += 1;
            }

            accumulated_time += frame_time;
            let mut num_updates: u64 = 0;

            while accumulated_time >= step {
                self.is_running_slowly = num_updates > 0;

                let mut ctx = UpdateCtx::new(simulation_time, step, self.is_running_slowly);
                game.update(&mut ctx);
                if ctx.exit_requested() {
                    self.is_game_running = false;
                }

                num_updates += 1;
                simulation_time += step;
                accumulated_time -= step;
            }

            // 1.0 = at the just-completed step, 0.0 = next step is due.
            let interpolation = 1.0 - accumulated_time.to_f64() / step.to_f64();

            {
                let mut ctx = DrawCtx::new(simulation_time, interpolation, &mut *self.renderer);
                game.draw(&mut ctx);
                if ctx.exit_requested() {
                    self.is_game_running = false;
                }
            }
            self.renderer.present();

            // Nap briefly when the next step is not imminent.
            let slept = accumulated_time + self.config.maximum_sleep_skew < step;
            if slept {
                self.platform.sleep(self.config.idle_sleep);
            }

            self.stats.record_frame(num_updates, slept);
        }

        self.is_game_running = false;
        log::info!(
            "game has left the main game loop after {} frames, {} updates",
            self.stats.frames,
            self.stats.updates
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{CountingRenderer, RecordingGame, ScriptedPlatform, ScriptedWindow};

    fn ms(v: i64) -> Time {
        Time::from_millis(v)
    }

    /// Runs `game` with one frame per delta and a window that quits afterwards.
    fn run_frames(
        deltas: &[i64],
        game: &mut RecordingGame,
    ) -> (ExitStatus, LoopStats, Vec<Time>, usize) {
        let mut window = ScriptedWindow::quit_after(deltas.len());
        let mut renderer = CountingRenderer::default();
        let platform = ScriptedPlatform::new(deltas.iter().map(|&d| ms(d)));

        let mut client = GameClient::with_platform(&mut window, &mut renderer, platform);
        let status = client.run(game);
        let stats = *client.stats();
        let sleeps = client.platform().sleeps.clone();
        drop(client);

        (status, stats, sleeps, renderer.presents)
    }

    // ── scenarios ─────────────────────────────────────────────────────────

    #[test]
    fn steady_frames_match_step() {
        let mut game = RecordingGame::default();
        let (status, stats, sleeps, presents) = run_frames(&[20, 20, 20, 20, 20], &mut game);

        assert_eq!(status, ExitStatus::Ok);
        assert_eq!(game.updates.len(), 5);
        assert_eq!(game.draws.len(), 5);
        assert_eq!(presents, 5);
        assert!(game.updates.iter().all(|u| !u.running_slowly));
        assert_eq!(game.draws.last().map(|d| d.simulation_time), Some(ms(100)));
        // Each frame ends with nothing accumulated: 0 + 10 < 20.
        assert_eq!(sleeps, vec![ms(2); 5]);
        assert_eq!(stats.sleeps, 5);
    }

    #[test]
    fn fast_frames_update_every_other_frame() {
        let mut game = RecordingGame::default();
        let (_, stats, sleeps, _) = run_frames(&[10, 10, 10, 10], &mut game);

        assert_eq!(game.updates.len(), 2);
        assert_eq!(game.draws.len(), 4);
        let interps: Vec<f64> = game.draws.iter().map(|d| d.interpolation).collect();
        assert_eq!(interps, vec![0.5, 1.0, 0.5, 1.0]);
        // Sleep only after frames that end at 0 ms accumulated (10 + 10 is not < 20).
        assert_eq!(sleeps.len(), 2);
        assert_eq!(stats.sleeps, 2);
    }

    #[test]
    fn slow_frame_catches_up_and_flags_slowness() {
        let mut game = RecordingGame::default();
        let (_, stats, _, _) = run_frames(&[80], &mut game);

        let slow: Vec<bool> = game.updates.iter().map(|u| u.running_slowly).collect();
        assert_eq!(slow, vec![false, true, true, true]);
        assert_eq!(game.draws.len(), 1);
        assert_eq!(stats.max_updates_in_frame, 4);
    }

    #[test]
    fn long_stall_is_clamped() {
        let mut game = RecordingGame::default();
        let (_, stats, _, _) = run_frames(&[5000], &mut game);

        let cap = ClientConfig::default().max_updates_per_frame();
        assert_eq!(game.updates.len(), 12);
        assert!(game.updates.len() as u64 <= cap);
        assert_eq!(game.draws[0].simulation_time, ms(240));
        assert_eq!(game.draws[0].interpolation, 0.5);
        assert_eq!(stats.clamped_frames, 1);
    }

    #[test]
    fn immediate_quit_skips_loop_but_unloads() {
        let mut game = RecordingGame::default();
        let (status, stats, _, presents) = run_frames(&[], &mut game);

        assert_eq!(status, ExitStatus::Ok);
        assert!(game.updates.is_empty());
        assert!(game.draws.is_empty());
        assert_eq!(presents, 0);
        assert_eq!(game.unloads, 1);
        assert_eq!(stats.frames, 0);
    }

    #[test]
    fn load_failure_is_fatal_and_skips_unload() {
        let mut game = RecordingGame {
            fail_load: true,
            ..RecordingGame::default()
        };
        let mut window = ScriptedWindow::quit_after(3);
        let mut renderer = CountingRenderer::default();
        let platform = ScriptedPlatform::new([ms(20); 3]);

        let mut client = GameClient::with_platform(&mut window, &mut renderer, platform);
        let status = client.run(&mut game);
        let time_queries = client.platform().queries;
        drop(client);

        assert_eq!(status, ExitStatus::FatalError);
        assert_eq!(game.initializes, 1);
        assert_eq!(game.loads, 1);
        assert_eq!(game.unloads, 0);
        assert!(game.updates.is_empty());
        assert_eq!(time_queries, 0);
        assert_eq!(window.processed, 0);
        assert!(window.shown);
    }

    #[test]
    fn initialize_failure_skips_content_loading() {
        let mut game = RecordingGame {
            fail_initialize: true,
            ..RecordingGame::default()
        };
        let (status, _, _, _) = run_frames(&[20], &mut game);

        assert_eq!(status, ExitStatus::FatalError);
        assert_eq!(game.loads, 0);
        assert_eq!(game.unloads, 0);
        assert!(game.draws.is_empty());
    }

    // ── invariants ────────────────────────────────────────────────────────

    #[test]
    fn simulation_time_advances_in_whole_steps() {
        let deltas = [7, 13, 31, 2, 45, 19, 20, 1, 0, 64, 9];
        let mut game = RecordingGame::default();
        run_frames(&deltas, &mut game);

        let step = ms(20);
        for (i, u) in game.updates.iter().enumerate() {
            assert_eq!(u.simulation_time, Time::from_nanos(step.as_nanos() * i as i64));
            assert_eq!(u.delta_time, step);
        }

        let total: i64 = deltas.iter().sum();
        assert_eq!(game.updates.len() as i64, total / 20);

        for d in &game.draws {
            assert!(d.interpolation > 0.0 && d.interpolation <= 1.0);
            assert_eq!(d.simulation_time.as_nanos() % step.as_nanos(), 0);
        }
    }

    #[test]
    fn interpolation_is_one_only_without_leftover_time() {
        let mut game = RecordingGame::default();
        run_frames(&[20, 5, 15, 30, 10], &mut game);

        let interps: Vec<f64> = game.draws.iter().map(|d| d.interpolation).collect();
        assert_eq!(interps, vec![1.0, 0.75, 1.0, 0.5, 1.0]);
    }

    #[test]
    fn backwards_clock_is_treated_as_no_time() {
        let mut game = RecordingGame::default();
        run_frames(&[20, -15, 20], &mut game);

        assert_eq!(game.updates.len(), 2);
        assert!(game.draws.iter().all(|d| d.interpolation == 1.0));
    }

    // ── termination / configuration ───────────────────────────────────────

    #[test]
    fn update_exit_stops_after_current_frame() {
        let mut game = RecordingGame {
            exit_after_updates: Some(2),
            ..RecordingGame::default()
        };
        let (status, _, _, _) = run_frames(&[20, 20, 20, 20, 20], &mut game);

        assert_eq!(status, ExitStatus::Ok);
        assert_eq!(game.updates.len(), 2);
        assert_eq!(game.draws.len(), 2);
        assert_eq!(game.unloads, 1);
    }

    #[test]
    fn draw_exit_stops_loop() {
        let mut game = RecordingGame {
            exit_after_draws: Some(3),
            ..RecordingGame::default()
        };
        let (_, stats, _, presents) = run_frames(&[10; 8], &mut game);

        assert_eq!(game.draws.len(), 3);
        assert_eq!(presents, 3);
        assert_eq!(stats.frames, 3);
        assert_eq!(game.unloads, 1);
    }

    #[test]
    fn running_slowly_is_readable_after_run() {
        let mut window = ScriptedWindow::quit_after(1);
        let mut renderer = CountingRenderer::default();
        let platform = ScriptedPlatform::new([ms(60)]);
        let mut game = RecordingGame::default();

        let mut client = GameClient::with_platform(&mut window, &mut renderer, platform);
        assert!(!client.is_running_slowly());
        client.run(&mut game);
        assert!(client.is_running_slowly());
        assert!(!client.is_game_running());
    }

    #[test]
    fn custom_update_frequency_and_skew() {
        let mut window = ScriptedWindow::quit_after(2);
        let mut renderer = CountingRenderer::default();
        let platform = ScriptedPlatform::new([ms(25), ms(25)]);
        let mut game = RecordingGame::default();

        let mut client = GameClient::with_platform(&mut window, &mut renderer, platform);
        client.set_update_frequency(100);
        client.set_maximum_sleep_skew(Time::ZERO);
        assert_eq!(client.update_frequency(), ms(10));
        client.run(&mut game);
        let sleeps = client.platform().sleeps.len();
        drop(client);

        // 25 ms → 2 updates, 5 left; 30 ms → 3 updates, 0 left.
        assert_eq!(game.updates.len(), 5);
        // 5 + 0 < 10 and 0 + 0 < 10.
        assert_eq!(sleeps, 2);
    }

    #[test]
    fn huge_update_rate_runs_nanosecond_steps() {
        let mut window = ScriptedWindow::quit_after(1);
        let mut renderer = CountingRenderer::default();
        let platform = ScriptedPlatform::new([Time::from_nanos(5)]);
        let mut game = RecordingGame::default();

        let mut client = GameClient::with_platform(&mut window, &mut renderer, platform);
        client.set_update_frequency(i32::MAX);
        assert_eq!(client.update_frequency(), Time::from_nanos(1));
        let status = client.run(&mut game);
        drop(client);

        assert_eq!(status, ExitStatus::Ok);
        assert_eq!(game.updates.len(), 5);
        assert_eq!(game.draws.len(), 1);
        assert_eq!(game.draws[0].simulation_time, Time::from_nanos(5));
        assert_eq!(game.draws[0].interpolation, 1.0);
    }

    #[test]
    fn config_overrides_idle_sleep() {
        let mut window = ScriptedWindow::quit_after(1);
        let mut renderer = CountingRenderer::default();
        let platform = ScriptedPlatform::new([ms(20)]);
        let mut game = RecordingGame::default();

        let config = ClientConfig::default().with_idle_sleep(Time::from_micros(500));
        let mut client =
            GameClient::with_platform(&mut window, &mut renderer, platform).with_config(config);
        client.run(&mut game);
        assert_eq!(client.platform().sleeps, vec![Time::from_micros(500)]);
    }

    #[test]
    #[should_panic(expected = "update rate must be positive")]
    fn zero_update_frequency_panics() {
        let mut window = ScriptedWindow::quit_after(0);
        let mut renderer = CountingRenderer::default();
        let mut client =
            GameClient::with_platform(&mut window, &mut renderer, ScriptedPlatform::default());
        client.set_update_frequency(0);
    }

    #[test]
    fn stop_before_run_does_not_prevent_loop() {
        let mut window = ScriptedWindow::quit_after(2);
        let mut renderer = CountingRenderer::default();
        let mut game = RecordingGame::default();

        let mut client = GameClient::with_platform(
            &mut window,
            &mut renderer,
            ScriptedPlatform::new([ms(20), ms(20)]),
        );
        client.stop();
        client.run(&mut game);
        assert_eq!(client.stats().frames, 2);
    }
}
