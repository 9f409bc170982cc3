use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window as OsWindow, WindowId};

use super::Window;

/// Upper bound on zero-timeout pumps while waiting for the initial `resumed`.
const STARTUP_PUMP_LIMIT: usize = 64;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,

    /// Treat a press of Escape as a quit request.
    pub quit_on_escape: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "delve".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            quit_on_escape: true,
        }
    }
}

impl WindowConfig {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.initial_size = LogicalSize::new(width, height);
        self
    }
}

/// Desktop window driven by `winit`'s pump-events extension.
///
/// Unlike `EventLoop::run_app`, pumping hands control back to the caller after
/// the OS queue is drained, which lets the game loop own the frame cadence.
/// The window is created hidden and becomes visible on [`Window::show`].
pub struct WinitWindow {
    event_loop: EventLoop<()>,
    handler: Handler,
    window: Arc<OsWindow>,
}

impl WinitWindow {
    pub fn new(config: WindowConfig) -> Result<Self> {
        let mut event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut handler = Handler::new(config);

        // `resumed` is delivered from inside the first pumps on desktop platforms.
        for _ in 0..STARTUP_PUMP_LIMIT {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(Duration::ZERO), &mut handler)
            {
                anyhow::bail!("event loop exited during startup (code {code})");
            }

            if handler.window.is_some() || handler.create_error.is_some() {
                break;
            }
        }

        if let Some(err) = handler.create_error.take() {
            return Err(err);
        }

        let window = handler
            .window
            .clone()
            .context("window was not created during startup")?;

        log::debug!("created window {:?}", window.id());

        Ok(Self {
            event_loop,
            handler,
            window,
        })
    }

    /// Shared handle to the OS window, used to bind a render surface.
    pub fn handle(&self) -> Arc<OsWindow> {
        Arc::clone(&self.window)
    }
}

impl Window for WinitWindow {
    fn show(&mut self) {
        self.window.set_visible(true);
        self.window.request_redraw();
    }

    fn process_messages(&mut self) {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.handler);

        if let PumpStatus::Exit(code) = status {
            log::debug!("event loop exited (code {code})");
            self.handler.quit = true;
        }
    }

    fn did_user_quit(&self) -> bool {
        self.handler.quit
    }
}

struct Handler {
    config: WindowConfig,
    window: Option<Arc<OsWindow>>,
    create_error: Option<anyhow::Error>,
    quit: bool,
}

impl Handler {
    fn new(config: WindowConfig) -> Self {
        Self {
            config,
            window: None,
            create_error: None,
            quit: false,
        }
    }
}

impl ApplicationHandler for Handler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = OsWindow::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_visible(false);

        match event_loop.create_window(attrs) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(e) => {
                self.create_error = Some(anyhow::Error::new(e).context("failed to create window"));
                self.quit = true;
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                log::info!("window close requested");
                self.quit = true;
            }

            WindowEvent::KeyboardInput { event, .. }
                if self.config.quit_on_escape
                    && event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                log::info!("escape pressed, quitting");
                self.quit = true;
            }

            _ => {}
        }
    }
}
