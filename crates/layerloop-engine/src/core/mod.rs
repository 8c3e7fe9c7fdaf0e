//! Frame scheduler.
//!
//! `Engine` owns the window (and through it the GPU context), the presentation
//! surface and the pending layer batch. The host drives it: `draw` between
//! frames, `update` once per frame until it returns `false`.

mod config;
mod engine;
mod state;

pub use config::EngineConfig;
pub use engine::{framebuffer_size_callback, DesktopEngine, Engine};
pub use state::EngineState;
