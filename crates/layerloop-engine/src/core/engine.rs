use anyhow::{Context, Result};
use image::RgbaImage;

use crate::device::GpuContext;
use crate::input::Key;
use crate::render::{Bitmap, BitmapSurface, Canvas, PresentationSurface};
use crate::scene::{DrawItem, Layer, LayerBatch};
use crate::window::{KeyCallback, ResizeCallback, Window, WinitWindow};

use super::{EngineConfig, EngineState};

/// Engine over the desktop collaborators (winit window, wgpu context, bitmap surface).
pub type DesktopEngine = Engine<WinitWindow, BitmapSurface>;

/// Layer-batched compositing loop.
///
/// Frame lifecycle (one [`Engine::update`] call):
/// 1. mark the loop running
/// 2. clear the color buffer
/// 3. flush the surface (draws composited by the *previous* update)
/// 4. swap buffers
/// 5. composite the pending batch onto the surface canvas
/// 6. start a fresh batch
/// 7. poll window events (callbacks run here)
/// 8. stop if Escape is held or a close was requested
///
/// Steps 3 and 5 give a one-frame lag: what is drawn before update `N`
/// reaches the screen during update `N + 1`.
pub struct Engine<W, S>
where
    W: Window,
    S: PresentationSurface<Context = W::Context>,
{
    window: W,
    surface: S,
    batch: LayerBatch<S::Bitmap>,
    state: EngineState,
}

impl DesktopEngine {
    /// Opens a window, creates its GPU context and the bitmap surface.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let EngineConfig { window, gpu } = config;

        let window = WinitWindow::new(window, gpu)?;
        let surface =
            BitmapSurface::new(window.gpu()).context("failed to create presentation surface")?;

        Ok(Self::from_parts(window, surface))
    }

    /// Uploads pixels to a bitmap usable in [`DrawItem`]s.
    pub fn create_bitmap(&self, image: &RgbaImage) -> Result<Bitmap> {
        self.surface.create_bitmap(image)
    }
}

impl<W, S> Engine<W, S>
where
    W: Window,
    S: PresentationSurface<Context = W::Context>,
{
    /// Builds an engine around already-constructed collaborators.
    pub fn from_parts(window: W, surface: S) -> Self {
        Self {
            window,
            surface,
            batch: LayerBatch::new(),
            state: EngineState::Stopped,
        }
    }

    /// Marks the loop running and installs the viewport-tracking resize handler.
    ///
    /// Calling it again re-installs the handler, replacing any user resize callback.
    pub fn start(&mut self) {
        self.set_state(EngineState::Running);
        self.window
            .set_resize_callback(Box::new(framebuffer_size_callback::<W::Context>));
    }

    /// Marks the loop stopped. The next [`Engine::update`] resumes it.
    pub fn stop(&mut self) {
        self.set_state(EngineState::Stopped);
    }

    /// Runs one frame. Returns whether the host should keep looping.
    pub fn update(&mut self) -> bool {
        self.set_state(EngineState::Running);

        self.window.context().clear_color_buffer();
        self.surface.flush(self.window.context());
        self.window.swap_buffers();

        // Swap first, then replay: the old batch is consumed by value.
        let batch = self.batch.take();
        log::trace!(
            "compositing {} items on {} layers",
            batch.len(),
            batch.layer_count()
        );
        let canvas = self.surface.canvas();
        for item in batch.into_paint_order() {
            canvas.draw_bitmap(item.bitmap, item.position.x, item.position.y);
        }

        self.window.poll_events();

        if self.window.is_key_down(Key::Escape) || self.window.should_close() {
            self.set_state(EngineState::Stopped);
        }

        self.state.is_running()
    }

    /// Queues `item` on `layer` for the next update. Accepted in any state.
    #[inline]
    pub fn draw(&mut self, layer: impl Into<Layer>, item: DrawItem<S::Bitmap>) {
        self.batch.push(layer.into(), item);
    }

    /// Replaces the framebuffer-resize callback (including the one `start` installs).
    pub fn set_resize_callback(&mut self, callback: ResizeCallback<W::Context>) {
        self.window.set_resize_callback(callback);
    }

    /// Replaces the keyboard callback.
    pub fn set_key_callback(&mut self, callback: KeyCallback) {
        self.window.set_key_callback(callback);
    }

    #[inline]
    pub fn state(&self) -> EngineState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Draws queued since the last update.
    #[inline]
    pub fn pending(&self) -> &LayerBatch<S::Bitmap> {
        &self.batch
    }

    #[inline]
    pub fn window(&self) -> &W {
        &self.window
    }

    #[inline]
    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[inline]
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn set_state(&mut self, next: EngineState) {
        if self.state != next {
            log::debug!("engine {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }
}

/// Resize handler installed by [`Engine::start`]: the viewport follows the framebuffer.
pub fn framebuffer_size_callback<C: GpuContext + ?Sized>(ctx: &mut C, width: u32, height: u32) {
    ctx.set_viewport(0, 0, width, height);
}
