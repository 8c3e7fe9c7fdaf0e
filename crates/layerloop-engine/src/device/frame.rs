/// Represents a single acquired swap-chain frame.
///
/// Acquired by `clear_color_buffer`, drawn into by the surface flush and
/// finalized by `Gpu::present`. Holding it prevents acquisition of the next one.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl GpuFrame {
    /// Size of the frame's color target in pixels.
    pub fn target_size(&self) -> (u32, u32) {
        let tex = &self.surface_texture.texture;
        (tex.width(), tex.height())
    }
}
