//! Game client: startup sequence, fixed-timestep main loop and shutdown.
//!
//! The loop is generic over its collaborators ([`Window`](crate::window::Window),
//! [`Renderer`](crate::render::Renderer), [`Platform`](crate::platform::Platform))
//! and drives a [`Game`] implementation supplied by the application.

mod client;
mod config;
mod game;
mod stats;
mod status;

#[cfg(test)]
mod testing;

pub use client::GameClient;
pub use config::ClientConfig;
pub use game::{DrawCtx, Game, UpdateCtx};
pub use stats::LoopStats;
pub use status::ExitStatus;
