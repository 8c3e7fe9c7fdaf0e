use std::fmt;
use std::sync::Arc;

/// GPU-resident image handle.
///
/// Cloning is cheap (shared handle); the texture is released when the last
/// clone is dropped. Created by `BitmapSurface::create_bitmap`.
#[derive(Clone)]
pub struct Bitmap {
    inner: Arc<BitmapInner>,
}

struct BitmapInner {
    width: u32,
    height: u32,
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

impl Bitmap {
    pub(super) fn new(
        width: u32,
        height: u32,
        texture: wgpu::Texture,
        bind_group: wgpu::BindGroup,
    ) -> Self {
        Self {
            inner: Arc::new(BitmapInner {
                width,
                height,
                _texture: texture,
                bind_group,
            }),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// True if both handles refer to the same GPU texture.
    #[inline]
    pub fn same_texture(&self, other: &Bitmap) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(super) fn bind_group(&self) -> &wgpu::BindGroup {
        &self.inner.bind_group
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.inner.width)
            .field("height", &self.inner.height)
            .finish_non_exhaustive()
    }
}
