use std::time::Instant;

use crate::time::Time;

use super::Platform;

/// Platform backed by `std::time::Instant` and `std::thread::sleep`.
///
/// Time is reported relative to the moment the platform was created.
#[derive(Debug, Clone)]
pub struct SystemPlatform {
    origin: Instant,
}

impl SystemPlatform {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for SystemPlatform {
    fn current_time(&mut self) -> Time {
        Time::from(self.origin.elapsed())
    }

    fn sleep(&mut self, duration: Time) {
        let d = duration.to_duration();
        if !d.is_zero() {
            std::thread::sleep(d);
        }
    }
}
