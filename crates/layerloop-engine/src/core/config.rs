use crate::device::GpuInit;
use crate::window::WindowConfig;

/// Everything needed to build a [`DesktopEngine`](super::DesktopEngine).
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub window: WindowConfig,
    pub gpu: GpuInit,
}

impl EngineConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.window.initial_size = winit::dpi::LogicalSize::new(width, height);
        self
    }

    pub fn with_clear_color(mut self, color: wgpu::Color) -> Self {
        self.gpu.clear_color = color;
        self
    }
}
