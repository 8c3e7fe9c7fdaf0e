use crate::coords::Viewport;

/// Immediate GPU-context operations used by the frame scheduler.
///
/// The context is owned by the window; the engine reaches it through
/// `Window::context`, and resize callbacks receive it directly.
pub trait GpuContext {
    /// Clears the color buffer of the current frame.
    fn clear_color_buffer(&mut self);

    /// Sets the region of the framebuffer that drawing maps onto.
    fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32);

    /// Returns the last viewport set.
    fn viewport(&self) -> Viewport;
}
