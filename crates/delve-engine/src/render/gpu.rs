use anyhow::{Context, Result};
use std::sync::Arc;
use winit::dpi::PhysicalSize;
use winit::window::Window as OsWindow;

use super::surface::{self, SurfaceErrorAction};
use super::{Color, Renderer};

/// Initialization parameters for the GPU renderer.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior). FIFO is vsynced and universally supported.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference; unsupported modes fall back to the first
    /// mode the surface reports.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Desired maximum frame latency. A hint; support depends on backend.
    pub desired_maximum_frame_latency: u32,

    /// Initial clear color.
    pub clear_color: Color,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            desired_maximum_frame_latency: 2,
            clear_color: Color::BLACK,
        }
    }
}

/// wgpu renderer bound to a window surface.
///
/// Each `present()` acquires the next swapchain texture, clears it to the
/// current clear color and presents it. Surface loss is recovered in place;
/// a fatal surface error marks the renderer lost and later presents are
/// skipped.
pub struct GpuRenderer {
    window: Arc<OsWindow>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    clear_color: Color,
    lost: bool,
}

impl GpuRenderer {
    /// Creates a renderer for `window`, blocking on adapter/device acquisition.
    pub fn new(window: Arc<OsWindow>, init: RendererConfig) -> Result<Self> {
        pollster::block_on(Self::new_async(window, init))
    }

    async fn new_async(window: Arc<OsWindow>, init: RendererConfig) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let RendererConfig {
            prefer_srgb,
            present_mode,
            alpha_mode,
            desired_maximum_frame_latency,
            clear_color,
        } = init;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(Arc::clone(&window))
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("delve device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps, prefer_srgb)
            .context("no supported surface formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode,
            alpha_mode: surface::choose_alpha_mode(&caps, alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency,
        };

        surface.configure(&device, &config);
        log::info!(
            "renderer ready: {:?}, {}x{}, {:?}",
            format,
            size.width,
            size.height,
            present_mode
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            size,
            clear_color,
            lost: false,
        })
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    /// True once a fatal surface error has been seen.
    pub fn is_lost(&self) -> bool {
        self.lost
    }

    /// Reconfigures the surface when the window size changed since last frame.
    ///
    /// A 0x0 size (minimized) is recorded but not applied; wgpu rejects it.
    fn sync_size(&mut self) {
        let new_size = self.window.inner_size();
        if new_size == self.size {
            return;
        }

        self.size = new_size;
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }
}

impl Renderer for GpuRenderer {
    fn present(&mut self) {
        if self.lost {
            return;
        }

        self.sync_size();
        if self.size.width == 0 || self.size.height == 0 {
            return;
        }

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(err) => {
                let action = surface::recover_from_error(
                    &self.surface,
                    &self.device,
                    &self.config,
                    self.size,
                    err,
                );
                match action {
                    SurfaceErrorAction::Fatal => {
                        log::error!("surface error is fatal, renderer lost");
                        self.lost = true;
                    }
                    SurfaceErrorAction::Reconfigured => log::debug!("surface reconfigured"),
                    SurfaceErrorAction::SkipFrame => log::trace!("skipping frame"),
                }
                return;
            }
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("delve frame encoder"),
            });

        {
            let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("delve clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view:           &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load:  wgpu::LoadOp::Clear(self.clear_color.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes:         None,
                occlusion_query_set:      None,
                multiview_mask:           None,
            });
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        frame.present();
    }
}
