//! Time subsystem.
//!
//! Provides the `Time` scalar used by the game loop and by platform clocks.
//! Integer storage keeps fixed-step accumulation exact; floating point is only
//! used at the edges (interpolation, logging, `Duration` interop).

mod scalar;

pub use scalar::Time;
