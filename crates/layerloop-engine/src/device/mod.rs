//! GPU context.
//!
//! This module is responsible for:
//! - the `GpuContext` contract the frame scheduler drives (clear, viewport)
//! - creating the wgpu Instance/Adapter/Device/Queue and the window Surface
//! - acquiring, clearing and presenting swap-chain frames

mod context;
mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use context::GpuContext;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
