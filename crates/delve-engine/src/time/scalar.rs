use core::fmt;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::time::Duration;

const NANOS_PER_SEC: i64 = 1_000_000_000;
const NANOS_PER_MILLI: i64 = 1_000_000;
const NANOS_PER_MICRO: i64 = 1_000;

/// Signed duration measured on the game's monotonic clock.
///
/// Stored as whole nanoseconds so that repeatedly adding or subtracting a fixed
/// simulation step is exact. Conversions to and from `f64` seconds are provided
/// for the few places that need floating point (interpolation, logging).
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Time {
    nanos: i64,
}

impl Time {
    pub const ZERO: Time = Time { nanos: 0 };

    #[inline]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self { nanos }
    }

    #[inline]
    pub const fn from_micros(micros: i64) -> Self {
        Self { nanos: micros * NANOS_PER_MICRO }
    }

    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Self { nanos: millis * NANOS_PER_MILLI }
    }

    /// Builds a time from fractional seconds, rounded to the nearest nanosecond.
    ///
    /// Non-finite input is a caller bug and panics.
    pub fn from_secs_f64(secs: f64) -> Self {
        assert!(secs.is_finite(), "Time::from_secs_f64: non-finite seconds ({secs})");
        Self {
            nanos: (secs * NANOS_PER_SEC as f64).round() as i64,
        }
    }

    #[inline]
    pub const fn as_nanos(self) -> i64 {
        self.nanos
    }

    /// Seconds as `f64`.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.nanos as f64 / NANOS_PER_SEC as f64
    }

    #[inline]
    pub fn as_millis_f64(self) -> f64 {
        self.nanos as f64 / NANOS_PER_MILLI as f64
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.nanos < 0
    }

    /// Converts to a `Duration`; negative values saturate to zero.
    pub fn to_duration(self) -> Duration {
        Duration::from_nanos(self.nanos.max(0) as u64)
    }
}

impl From<Duration> for Time {
    fn from(d: Duration) -> Self {
        Self {
            nanos: i64::try_from(d.as_nanos()).unwrap_or(i64::MAX),
        }
    }
}

impl Add for Time {
    type Output = Time;
    #[inline]
    fn add(self, rhs: Time) -> Time {
        Time::from_nanos(self.nanos + rhs.nanos)
    }
}

impl Sub for Time {
    type Output = Time;
    #[inline]
    fn sub(self, rhs: Time) -> Time {
        Time::from_nanos(self.nanos - rhs.nanos)
    }
}

impl AddAssign for Time {
    #[inline]
    fn add_assign(&mut self, rhs: Time) {
        self.nanos += rhs.nanos;
    }
}

impl SubAssign for Time {
    #[inline]
    fn sub_assign(&mut self, rhs: Time) {
        self.nanos -= rhs.nanos;
    }
}

impl Neg for Time {
    type Output = Time;
    #[inline]
    fn neg(self) -> Time {
        Time::from_nanos(-self.nanos)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}ms", self.as_millis_f64())
    }
}
