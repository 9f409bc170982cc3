/// Counters maintained by the main loop.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct LoopStats {
    /// Outer iterations (one per draw).
    pub frames: u64,
    pub updates: u64,
    pub draws: u64,
    pub sleeps: u64,

    /// Frames whose elapsed time hit the clamp.
    pub clamped_frames: u64,

    /// Largest number of updates run in a single outer iteration.
    pub max_updates_in_frame: u64,
}

impl LoopStats {
    pub(crate) fn record_frame(&mut self, updates: u64, slept: bool) {
        self.frames += 1;
        self.draws += 1;
        self.updates += updates;
        self.max_updates_in_frame = self.max_updates_in_frame.max(updates);
        if slept {
            self.sleeps += 1;
        }
    }
}
