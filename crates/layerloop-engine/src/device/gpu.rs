use std::sync::Arc;

use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::coords::Viewport;

use super::surface;
use super::{GpuContext, GpuFrame, GpuInit, SurfaceErrorAction};

/// Owns wgpu core objects, the surface configuration and the in-flight frame.
///
/// This type is the low-level rendering context:
/// - requests an adapter and stores Device/Queue
/// - creates and configures the Surface (swap chain)
/// - acquires a frame on clear and hands it to the presentation surface
/// - presents the frame on swap
pub struct Gpu {
    /// Surface bound to the window. `'static` because the window is shared via `Arc`.
    surface: wgpu::Surface<'static>,

    /// Logical device.
    device: wgpu::Device,

    /// Command queue.
    queue: wgpu::Queue,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,

    /// Current framebuffer size in physical pixels.
    size: PhysicalSize<u32>,

    clear_color: wgpu::Color,
    viewport: Viewport,

    /// Frame acquired by the last clear, waiting for `present`.
    frame: Option<GpuFrame>,

    /// Set after a fatal surface error; no further frames are acquired.
    lost: bool,
}

impl Gpu {
    /// Creates a GPU context bound to a window.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu; callers block on it.
    pub async fn new(window: Arc<Window>, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let GpuInit {
            prefer_srgb,
            present_mode,
            alpha_mode,
            required_features,
            required_limits,
            desired_maximum_frame_latency,
            clear_color,
        } = init;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
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
                label: Some("layerloop device"),
                required_features,
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&surface_caps, prefer_srgb)
            .context("no supported surface formats")?;

        let alpha_mode = surface::choose_alpha_mode(&surface_caps, alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency,
        };

        surface.configure(&device, &config);

        let info = adapter.get_info();
        log::info!(
            "gpu ready: {} ({:?}), surface {:?} {}x{}",
            info.name,
            info.backend,
            format,
            size.width,
            size.height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            clear_color,
            // Matches the framebuffer until the first resize.
            viewport: Viewport::full(size.width, size.height),
            frame: None,
            lost: false,
        })
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the current framebuffer size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Returns a reference to the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns a reference to the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// True once a fatal surface error has been observed.
    pub fn is_lost(&self) -> bool {
        self.lost
    }

    /// The frame acquired by the last clear, if any.
    pub fn frame_mut(&mut self) -> Option<&mut GpuFrame> {
        self.frame.as_mut()
    }

    /// Reconfigures the swap chain after a framebuffer resize.
    ///
    /// The viewport is left alone; that is the resize callback's job.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if self.frame.take().is_some() {
            log::debug!("discarding in-flight frame before resize");
        }
        self.size = new_size;
        surface::configure(&self.surface, &self.device, &mut self.config, new_size);
    }

    /// Submits the in-flight frame's commands and presents it.
    ///
    /// Returns `false` if no frame was acquired (zero-size or skipped frame).
    pub fn present(&mut self) -> bool {
        let Some(GpuFrame {
            surface_texture,
            view,
            encoder,
        }) = self.frame.take()
        else {
            return false;
        };

        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
        true
    }

    /// Reacts to a failed frame acquisition.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        let action = SurfaceErrorAction::for_error(&err);
        match action {
            SurfaceErrorAction::Reconfigured => {
                log::debug!("reconfiguring surface after {err:?}");
                surface::configure(&self.surface, &self.device, &mut self.config, self.size);
            }
            SurfaceErrorAction::SkipFrame => log::warn!("skipping frame: {err:?}"),
            SurfaceErrorAction::Fatal => {
                log::error!("surface error is fatal: {err:?}");
                self.lost = true;
            }
        }
        action
    }

    fn begin_frame(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("layerloop frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Returns the in-flight frame, acquiring one if needed.
    fn acquire_frame(&mut self) -> Option<&mut GpuFrame> {
        if self.frame.is_none() {
            if self.lost || !surface::is_drawable(self.size) {
                return None;
            }
            match self.begin_frame() {
                Ok(frame) => self.frame = Some(frame),
                Err(err) => {
                    self.handle_surface_error(err);
                    return None;
                }
            }
        }
        self.frame.as_mut()
    }
}

impl GpuContext for Gpu {
    fn clear_color_buffer(&mut self) {
        let clear = self.clear_color;
        let Some(frame) = self.acquire_frame() else {
            return;
        };

        // Render pass is dropped immediately; the clear is its only effect.
        let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("layerloop clear"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
    }

    fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.viewport = Viewport::new(x, y, width, height);
        log::debug!("viewport set to {:?}", self.viewport);
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}
