//! Coordinate types shared by the batch, the surface and the GPU context.
//!
//! Canonical space is the framebuffer:
//! - physical pixels
//! - origin top-left
//! - +X right, +Y down

mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::Viewport;
