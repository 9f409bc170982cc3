use crate::time::Time;

/// Smallest representable simulation step.
const MIN_STEP: Time = Time::from_nanos(1);

/// Game loop tunables.
///
/// Defaults: 50 updates per second, 10 ms sleep skew, 2 ms idle sleep and a
/// 250 ms per-frame clamp.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClientConfig {
    /// Fixed simulation step.
    pub update_frequency: Time,

    /// Sleep is skipped when the next step is due within this budget.
    pub maximum_sleep_skew: Time,

    /// Length of the voluntary nap taken when the loop is ahead of schedule.
    pub idle_sleep: Time,

    /// Frame time is clamped to this before being accumulated.
    pub max_frame_time: Time,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            update_frequency: Time::from_millis(20),
            maximum_sleep_skew: Time::from_millis(10),
            idle_sleep: Time::from_millis(2),
            max_frame_time: Time::from_millis(250),
        }
    }
}

impl ClientConfig {
    /// Sets the step to `1 / updates_per_second` seconds.
    ///
    /// Panics when `updates_per_second <= 0`.
    pub fn with_update_rate(mut self, updates_per_second: i32) -> Self {
        self.update_frequency = step_for_rate(updates_per_second);
        self
    }

    pub fn with_maximum_sleep_skew(mut self, skew: Time) -> Self {
        self.maximum_sleep_skew = skew;
        self
    }

    pub fn with_idle_sleep(mut self, sleep: Time) -> Self {
        self.idle_sleep = sleep;
        self
    }

    pub fn with_max_frame_time(mut self, max: Time) -> Self {
        self.max_frame_time = max;
        self
    }

    /// Upper bound on catch-up updates in one outer iteration:
    /// `ceil(max_frame_time / update_frequency)`.
    ///
    /// Panics on a non-positive step or frame clamp.
    pub fn max_updates_per_frame(&self) -> u64 {
        self.assert_valid();
        let step = self.update_frequency.as_nanos();
        let max = self.max_frame_time.as_nanos();
        ((max + step - 1) / step) as u64
    }

    pub(crate) fn assert_valid(&self) {
        assert!(
            self.update_frequency > Time::ZERO,
            "update frequency must be positive (got {})",
            self.update_frequency
        );
        assert!(
            self.max_frame_time > Time::ZERO,
            "max frame time must be positive (got {})",
            self.max_frame_time
        );
        assert!(
            !self.maximum_sleep_skew.is_negative() && !self.idle_sleep.is_negative(),
            "sleep skew and idle sleep must not be negative"
        );
    }
}

pub(crate) fn step_for_rate(updates_per_second: i32) -> Time {
    assert!(
        updates_per_second > 0,
        "update rate must be positive (got {updates_per_second})"
    );
    // Rates above 2 GHz would round to a zero step; one nanosecond is the floor.
    Time::from_secs_f64(1.0 / updates_per_second as f64).max(MIN_STEP)
}
