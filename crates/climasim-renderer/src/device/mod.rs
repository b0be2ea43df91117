//! Graphics device seam.
//!
//! Everything the globe needs from a GPU goes through [`GraphicsDevice`]:
//! resource creation, program linking, draw submission, and release.
//! [`WgpuDevice`] drives real hardware; [`RecordingDevice`] records draws
//! for headless runs and tests.

mod recording;
mod types;
mod wgpu_device;

pub use recording::*;
pub use types::*;
pub use wgpu_device::*;

/// GPU resource creation and draw submission.
///
/// Handles are opaque and only meaningful to the device that issued them.
/// Releasing an unknown or already released handle is a no-op.
pub trait GraphicsDevice {
    /// Upload an indexed mesh.
    fn create_mesh(&mut self, mesh: &MeshUpload<'_>) -> MeshHandle;

    /// Upload an RGBA8 texture with its mip chain.
    fn create_texture(&mut self, texture: &TextureUpload) -> TextureHandle;

    /// Link compiled stages into one pipeline per variant.
    fn link_program(&mut self, program: &ProgramLink<'_>) -> Result<ProgramHandle, DeviceError>;

    /// Queue one indexed draw with a snapshot of the uniform block.
    fn draw(&mut self, call: &DrawCall<'_>);

    fn release_mesh(&mut self, mesh: MeshHandle);

    fn release_texture(&mut self, texture: TextureHandle);

    fn release_program(&mut self, program: ProgramHandle);
}
