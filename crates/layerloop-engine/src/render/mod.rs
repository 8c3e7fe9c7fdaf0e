//! Presentation surface.
//!
//! The frame scheduler composites batches onto a `Canvas` and later flushes
//! the queued commands through `PresentationSurface::flush`. The wgpu-backed
//! `BitmapSurface` owns its GPU resources (pipeline, buffers, sampler).
//!
//! Convention:
//! - CPU geometry is in framebuffer pixels (top-left origin, +Y down).
//! - Vertex shader converts to NDC using a viewport uniform.

mod bitmap;
mod bitmap_surface;
mod common;
mod surface;

pub use bitmap::Bitmap;
pub use bitmap_surface::{BitmapCanvas, BitmapSurface, QueuedDraw};
pub use surface::{Canvas, PresentationSurface};
