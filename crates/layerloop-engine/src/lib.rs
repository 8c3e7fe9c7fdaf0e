//! layerloop engine crate.
//!
//! A layer-batched frame loop: the host queues bitmap draws tagged with a
//! depth layer and calls [`core::Engine::update`] once per frame. Window,
//! GPU context and presentation surface are traits so the loop can run over
//! the desktop backend (winit + wgpu) or any other implementation.

pub mod core;
pub mod coords;
pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod scene;
pub mod window;
