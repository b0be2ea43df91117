use std::sync::Arc;
use winit::window::Window;

use crate::device::{GpuResources, WgpuDevice};
use crate::gpu::{GpuContext, RendererError};

use super::helpers::create_depth_view;

/// Core rendering state: GPU context, device-side globe resources, and the
/// depth attachment.
pub struct RenderState {
    pub gpu: GpuContext,
    pub(super) resources: GpuResources,
    pub(super) depth_view: wgpu::TextureView,
    pub clear_color: wgpu::Color,
}

impl RenderState {
    /// Create a fully initialized render state from a window.
    pub async fn new(window: Arc<Window>) -> Result<Self, RendererError> {
        let gpu = GpuContext::new(window).await?;
        let resources = GpuResources::new(&gpu.device, gpu.format());
        let depth_view = create_depth_view(&gpu.device, gpu.size.width, gpu.size.height);

        Ok(Self {
            gpu,
            resources,
            depth_view,
            clear_color: wgpu::Color {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: 1.0,
            },
        })
    }

    /// Handle a window resize by reconfiguring the surface and depth buffer.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        let size = self.gpu.size;
        self.depth_view = create_depth_view(&self.gpu.device, size.width, size.height);
    }

    /// Set the background clear color for frame rendering.
    pub fn set_clear_color(&mut self, r: f64, g: f64, b: f64) {
        self.clear_color = wgpu::Color { r, g, b, a: 1.0 };
    }

    /// Surface width over height.
    pub fn aspect(&self) -> f32 {
        self.gpu.size.aspect()
    }

    /// The graphics device globe construction and draws go through.
    pub fn graphics(&mut self) -> WgpuDevice<'_> {
        WgpuDevice::new(&self.gpu.device, &self.gpu.queue, &mut self.resources)
    }
}
