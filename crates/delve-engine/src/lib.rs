//! Delve engine crate.
//!
//! Owns the fixed-timestep game loop, the platform/window/renderer facades it
//! drives, and the integer lattice geometry used by the world layer.

pub mod core;
pub mod coords;
pub mod platform;
pub mod render;
pub mod time;
pub mod window;

pub mod logging;
