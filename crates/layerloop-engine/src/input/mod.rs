//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The window backend translates platform events into `KeyEvent`s and keeps
//! an `InputState` for "is this key held" queries.

pub(crate) mod platform;
mod state;
mod types;

pub use state::InputState;
pub use types::{Key, KeyEvent, KeyState, Modifiers};
