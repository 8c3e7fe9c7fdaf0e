use crate::device::GpuContext;

/// 2D drawing target that records bitmap draws.
pub trait Canvas<B> {
    /// Queues `bitmap` with its top-left corner at `(x, y)` in surface pixels.
    fn draw_bitmap(&mut self, bitmap: B, x: f32, y: f32);
}

/// GPU-backed drawing surface owned by the engine.
///
/// Draws recorded on the canvas stay queued until the next `flush`, which
/// encodes them into the frame the context acquired on clear.
pub trait PresentationSurface {
    /// Opaque image handle accepted by the canvas.
    type Bitmap;

    /// GPU context the surface flushes into.
    type Context: GpuContext;

    type Canvas: Canvas<Self::Bitmap>;

    /// Sends all queued draws to the GPU and empties the queue.
    fn flush(&mut self, ctx: &mut Self::Context);

    fn canvas(&mut self) -> &mut Self::Canvas;
}
