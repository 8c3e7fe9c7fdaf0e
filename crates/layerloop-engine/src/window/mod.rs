//! Window/context collaborators.
//!
//! `Window` is the contract the frame scheduler drives; `WinitWindow` is the
//! desktop implementation that owns the winit event loop, the OS window and
//! the wgpu context.

mod backend;
mod callbacks;
mod winit_window;

pub use backend::Window;
pub use callbacks::{Callbacks, KeyCallback, ResizeCallback};
pub use winit_window::{WindowConfig, WinitWindow};
