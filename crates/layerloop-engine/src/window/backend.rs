use crate::device::GpuContext;
use crate::input::Key;

use super::{KeyCallback, ResizeCallback};

/// OS window + GPU context, as seen by the frame scheduler.
///
/// Implementations own the GPU context and hand it out through [`Window::context`].
/// Registered callbacks are invoked synchronously from [`Window::poll_events`].
pub trait Window {
    type Context: GpuContext + 'static;

    fn context(&mut self) -> &mut Self::Context;

    /// Framebuffer size in physical pixels.
    fn framebuffer_size(&self) -> (u32, u32);

    fn is_key_down(&self, key: Key) -> bool;

    /// True once the OS (or the host) asked the window to close.
    fn should_close(&self) -> bool;

    /// Presents the current framebuffer.
    fn swap_buffers(&mut self);

    /// Processes pending OS events and runs the registered callbacks.
    fn poll_events(&mut self);

    /// Replaces the framebuffer-resize callback.
    fn set_resize_callback(&mut self, callback: ResizeCallback<Self::Context>);

    /// Replaces the keyboard callback.
    fn set_key_callback(&mut self, callback: KeyCallback);
}
