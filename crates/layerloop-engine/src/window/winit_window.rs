use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window as OsWindow, WindowId};

use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::{map_modifiers, translate_key_event};
use crate::input::{InputState, Key, KeyEvent};

use super::{Callbacks, KeyCallback, ResizeCallback, Window};

/// Pumps allowed for the platform to deliver `resumed` during startup.
const STARTUP_PUMP_LIMIT: usize = 64;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "layerloop".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            resizable: true,
        }
    }
}

/// Desktop window backed by winit and wgpu.
///
/// The host owns the loop: instead of handing control to `EventLoop::run_app`,
/// every [`Window::poll_events`] pumps the event loop once with a zero timeout.
/// Events are recorded during the pump and the registered callbacks run right
/// after it, still inside `poll_events`.
pub struct WinitWindow {
    // Field order is drop order: GPU surface first, event loop last.
    gpu: Gpu,
    callbacks: Callbacks<Gpu>,
    window: Arc<OsWindow>,
    platform: Platform,
    event_loop: EventLoop<()>,
}

impl WinitWindow {
    /// Opens the window and creates its GPU context.
    pub fn new(config: WindowConfig, gpu_init: GpuInit) -> Result<Self> {
        let mut event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut platform = Platform::new(config);

        // Window creation happens in `resumed`, delivered by the first pumps.
        for _ in 0..STARTUP_PUMP_LIMIT {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(Duration::ZERO), &mut platform)
            {
                anyhow::bail!("event loop exited during startup (code {code})");
            }
            if let Some(err) = platform.create_error.take() {
                return Err(err);
            }
            if platform.window.is_some() {
                break;
            }
        }

        let window = platform
            .window
            .clone()
            .context("platform never resumed; no window was created")?;

        let gpu = pollster::block_on(Gpu::new(window.clone(), gpu_init))
            .context("GPU initialization failed for window")?;

        // Startup resizes predate any callback and the swap chain already matches.
        platform.pending.clear();

        log::info!(
            "window {:?} opened at {}x{}",
            window.id(),
            platform.framebuffer_size.width,
            platform.framebuffer_size.height
        );

        Ok(Self {
            gpu,
            callbacks: Callbacks::default(),
            window,
            platform,
            event_loop,
        })
    }

    /// The underlying winit window.
    pub fn os_window(&self) -> &OsWindow {
        &self.window
    }

    pub fn gpu(&self) -> &Gpu {
        &self.gpu
    }

    /// Sets or clears the close request, like the OS close button does.
    pub fn set_should_close(&mut self, value: bool) {
        self.platform.close_requested = value;
    }
}

impl Window for WinitWindow {
    type Context = Gpu;

    #[inline]
    fn context(&mut self) -> &mut Gpu {
        &mut self.gpu
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        let size = self.platform.framebuffer_size;
        (size.width, size.height)
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.platform.input.key_down(key)
    }

    fn should_close(&self) -> bool {
        self.platform.close_requested || self.gpu.is_lost()
    }

    fn swap_buffers(&mut self) {
        self.window.pre_present_notify();
        self.gpu.present();
    }

    fn poll_events(&mut self) {
        if let PumpStatus::Exit(code) = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.platform)
        {
            log::debug!("event loop exited (code {code}); treating as close request");
            self.platform.close_requested = true;
        }

        for ev in std::mem::take(&mut self.platform.pending) {
            match ev {
                PendingEvent::Resized(size) => {
                    self.gpu.resize(size);
                    self.callbacks
                        .dispatch_resize(&mut self.gpu, size.width, size.height);
                }
                PendingEvent::Key(key) => {
                    self.callbacks.dispatch_key(&key);
                }
            }
        }
    }

    fn set_resize_callback(&mut self, callback: ResizeCallback<Gpu>) {
        self.callbacks.set_resize(callback);
    }

    fn set_key_callback(&mut self, callback: KeyCallback) {
        self.callbacks.set_key(callback);
    }
}

/// Event recorded during a pump, dispatched once the pump returns.
enum PendingEvent {
    Resized(PhysicalSize<u32>),
    Key(KeyEvent),
}

/// winit application handler: creates the window and records its events.
struct Platform {
    config: WindowConfig,
    window: Option<Arc<OsWindow>>,
    create_error: Option<anyhow::Error>,

    input: InputState,
    close_requested: bool,
    framebuffer_size: PhysicalSize<u32>,

    pending: Vec<PendingEvent>,
}

impl Platform {
    fn new(config: WindowConfig) -> Self {
        Self {
            config,
            window: None,
            create_error: None,
            input: InputState::default(),
            close_requested: false,
            framebuffer_size: PhysicalSize::new(0, 0),
            pending: Vec::new(),
        }
    }

    fn owns(&self, id: WindowId) -> bool {
        self.window.as_ref().is_some_and(|w| w.id() == id)
    }
}

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = OsWindow::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable);

        match event_loop.create_window(attrs) {
            Ok(window) => {
                self.framebuffer_size = window.inner_size();
                self.window = Some(Arc::new(window));
            }
            Err(e) => {
                self.create_error = Some(anyhow::Error::new(e).context("failed to create window"));
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // The host paces the loop; never block inside a pump.
        event_loop.set_control_flow(ControlFlow::Poll);
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if !self.owns(window_id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::debug!("close requested");
                self.close_requested = true;
            }

            WindowEvent::Resized(size) => {
                self.framebuffer_size = size;
                self.pending.push(PendingEvent::Resized(size));
            }

            WindowEvent::ModifiersChanged(m) => {
                self.input.set_modifiers(map_modifiers(m.state()));
            }

            WindowEvent::Focused(focused) => {
                self.input.set_focused(focused);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let key = translate_key_event(&event, self.input.modifiers);
                self.input.apply_key(&key);
                self.pending.push(PendingEvent::Key(key));
            }

            _ => {}
        }
    }
}
