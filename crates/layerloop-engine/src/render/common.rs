//! Shared GPU types and helpers for the bitmap renderer.

use bytemuck::{Pod, Zeroable};

use crate::coords::Viewport;

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub size: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

/// Returns the `wgpu` minimum binding size for the viewport uniform buffer.
pub(super) fn viewport_ubo_min_binding_size() -> Option<std::num::NonZeroU64> {
    std::num::NonZeroU64::new(std::mem::size_of::<ViewportUniform>() as u64)
}

// ── quad vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1, doubles as uv
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

// ── viewport clamping ─────────────────────────────────────────────────────

/// Intersects `viewport` with a `target_w` x `target_h` color target.
///
/// wgpu rejects viewports that leave the render target, while the context
/// accepts any rectangle. Returns `None` when nothing remains to draw into.
pub(super) fn clamp_viewport(viewport: Viewport, target_w: u32, target_h: u32) -> Option<Viewport> {
    let x0 = i64::from(viewport.x).max(0);
    let y0 = i64::from(viewport.y).max(0);
    let x1 = (i64::from(viewport.x) + i64::from(viewport.width)).min(i64::from(target_w));
    let y1 = (i64::from(viewport.y) + i64::from(viewport.height)).min(i64::from(target_h));

    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    // Bounded by the target size, so the narrowing casts cannot truncate.
    Some(Viewport::new(
        x0 as i32,
        y0 as i32,
        (x1 - x0) as u32,
        (y1 - y0) as u32,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inside_target_is_unchanged() {
        let vp = Viewport::full(800, 600);
        assert_eq!(clamp_viewport(vp, 800, 600), Some(vp));
    }

    #[test]
    fn larger_than_target_is_cropped() {
        let vp = Viewport::full(1920, 1080);
        assert_eq!(clamp_viewport(vp, 800, 600), Some(Viewport::full(800, 600)));
    }

    #[test]
    fn negative_origin_is_cropped() {
        let vp = Viewport::new(-10, -20, 100, 100);
        assert_eq!(
            clamp_viewport(vp, 800, 600),
            Some(Viewport::new(0, 0, 90, 80))
        );
    }

    #[test]
    fn zero_size_or_outside_is_none() {
        assert_eq!(clamp_viewport(Viewport::full(0, 0), 800, 600), None);
        assert_eq!(clamp_viewport(Viewport::new(900, 0, 10, 10), 800, 600), None);
    }
}
