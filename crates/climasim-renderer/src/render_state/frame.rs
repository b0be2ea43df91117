use crate::gpu::RendererError;

use super::helpers::log_first_frame;
use super::state::RenderState;

impl RenderState {
    /// Encode every draw queued since the last present into one pass and
    /// show the result.
    pub fn present(&mut self) -> Result<(), RendererError> {
        let output = match self.gpu.current_texture() {
            Ok(t) => t,
            Err(e) => {
                tracing::error!("Failed to get surface texture: {e}");
                self.resources.discard_pending();
                return Err(RendererError::SurfaceError(e.to_string()));
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("climasim frame encoder"),
            });

        self.resources
            .encode(&mut encoder, &view, &self.depth_view, self.clear_color);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        log_first_frame(self.gpu.size.width, self.gpu.size.height, self.gpu.format());

        Ok(())
    }

    /// Drop whatever was queued for a frame that will not be presented.
    pub fn discard_frame(&mut self) {
        self.resources.discard_pending();
    }
}
