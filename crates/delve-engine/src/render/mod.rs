//! Rendering facade.
//!
//! The game loop treats rendering as a single `present()` call per frame;
//! everything drawn in `Game::draw` is flushed by it. [`GpuRenderer`] is the
//! wgpu backend.

mod color;
mod gpu;
mod surface;

pub use color::Color;
pub use gpu::{GpuRenderer, RendererConfig};
pub use surface::SurfaceErrorAction;

/// Contract the game loop consumes from a renderer.
pub trait Renderer {
    /// Presents the current frame. May block for vsync.
    fn present(&mut self);
}
