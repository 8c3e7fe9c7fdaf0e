/// GPU viewport rectangle in framebuffer pixels.
///
/// The resize handler always produces a viewport anchored at the origin that
/// covers the whole framebuffer; there is no letterboxing.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Viewport covering a `width` x `height` framebuffer from the origin.
    #[inline]
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// A zero-area viewport draws nothing.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_is_anchored_at_origin() {
        assert_eq!(Viewport::full(640, 480), Viewport::new(0, 0, 640, 480));
    }

    #[test]
    fn zero_dimension_is_empty() {
        assert!(Viewport::full(0, 0).is_empty());
        assert!(Viewport::full(10, 0).is_empty());
        assert!(!Viewport::full(1, 1).is_empty());
    }
}
