//! Platform services consumed by the game loop.
//!
//! The loop only needs a monotonic clock and a way to yield the CPU. Both are
//! behind the [`Platform`] trait so tests can script time deterministically.

mod system;

pub use system::SystemPlatform;

use crate::time::Time;

/// Clock + sleep contract.
pub trait Platform {
    /// Monotonic time since an arbitrary origin.
    ///
    /// Successive calls must never go backwards.
    fn current_time(&mut self) -> Time;

    /// Best-effort sleep; may return early or late.
    fn sleep(&mut self, duration: Time);
}
