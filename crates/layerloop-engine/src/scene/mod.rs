//! Per-frame draw batch types.
//!
//! Responsibilities:
//! - store pending bitmap draws between frames
//! - provide deterministic paint order (ascending layer + insertion order)

mod batch;
mod item;
mod layer;

pub use batch::LayerBatch;
pub use item::DrawItem;
pub use layer::Layer;
