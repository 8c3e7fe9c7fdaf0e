use crate::coords::Vec2;

/// A single bitmap draw request.
///
/// `B` is the surface's bitmap handle type; the batch treats it as opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem<B> {
    pub bitmap: B,
    /// Top-left corner in surface pixels.
    pub position: Vec2,
}

impl<B> DrawItem<B> {
    #[inline]
    pub fn new(bitmap: B, position: impl Into<Vec2>) -> Self {
        Self {
            bitmap,
            position: position.into(),
        }
    }
}
