//! Window facade.
//!
//! The game loop only needs to show a window, drain its message queue and ask
//! whether the user asked to quit. [`WinitWindow`] is the desktop backend.

mod native;

pub use native::{WindowConfig, WinitWindow};

/// Contract the game loop consumes from a platform window.
pub trait Window {
    fn show(&mut self);

    /// Drains pending OS events without blocking longer than the OS requires.
    fn process_messages(&mut self);

    /// Whether the user requested to quit. Once true, stays true.
    fn did_user_quit(&self) -> bool;
}
