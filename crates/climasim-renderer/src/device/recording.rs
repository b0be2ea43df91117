//! Headless device that records draws instead of executing them.
//!
//! Used by `--headless` runs and by every test that needs a globe without
//! a GPU. Tracks live resources so leaks and double releases are visible.

use std::collections::HashMap;

use super::types::{
    DeviceError, DrawCall, HandleAllocator, MeshHandle, MeshUpload, ProgramHandle, ProgramLink,
    TextureHandle, TextureUpload, VertexLayout,
};
use super::GraphicsDevice;

/// A draw captured by [`RecordingDevice`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub program: ProgramHandle,
    pub variant: usize,
    pub mesh: MeshHandle,
    pub textures: Vec<TextureHandle>,
    pub uniforms: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshInfo {
    pub label: String,
    pub layout: VertexLayout,
    pub vertex_count: usize,
    pub index_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureInfo {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub mip_levels: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo {
    pub label: String,
    pub uniform_size: u64,
    pub texture_count: u32,
    pub variants: Vec<&'static str>,
}

#[derive(Debug, Default)]
pub struct RecordingDevice {
    handles: HandleAllocator,
    meshes: HashMap<MeshHandle, MeshInfo>,
    textures: HashMap<TextureHandle, TextureInfo>,
    programs: HashMap<ProgramHandle, ProgramInfo>,
    draws: Vec<RecordedDraw>,
    link_failure: Option<String>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// A device whose every link attempt fails with `message`.
    pub fn failing_link(message: impl Into<String>) -> Self {
        Self {
            link_failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn draws(&self) -> &[RecordedDraw] {
        &self.draws
    }

    /// Drain recorded draws, e.g. at the end of a frame.
    pub fn take_draws(&mut self) -> Vec<RecordedDraw> {
        std::mem::take(&mut self.draws)
    }

    pub fn live_meshes(&self) -> usize {
        self.meshes.len()
    }

    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    pub fn live_programs(&self) -> usize {
        self.programs.len()
    }

    pub fn mesh_info(&self, mesh: MeshHandle) -> Option<&MeshInfo> {
        self.meshes.get(&mesh)
    }

    pub fn texture_info(&self, texture: TextureHandle) -> Option<&TextureInfo> {
        self.textures.get(&texture)
    }

    pub fn program_info(&self, program: ProgramHandle) -> Option<&ProgramInfo> {
        self.programs.get(&program)
    }
}

impl GraphicsDevice for RecordingDevice {
    fn create_mesh(&mut self, mesh: &MeshUpload<'_>) -> MeshHandle {
        let handle = MeshHandle(self.handles.next());
        let stride = mesh.layout.stride() as usize;
        self.meshes.insert(
            handle,
            MeshInfo {
                label: mesh.label.to_string(),
                layout: mesh.layout,
                vertex_count: mesh.vertices.len() / stride,
                index_count: mesh.indices.len(),
            },
        );
        handle
    }

    fn create_texture(&mut self, texture: &TextureUpload) -> TextureHandle {
        let handle = TextureHandle(self.handles.next());
        let (width, height) = texture
            .levels
            .first()
            .map(|level| level.dimensions())
            .unwrap_or((0, 0));
        self.textures.insert(
            handle,
            TextureInfo {
                label: texture.label.clone(),
                width,
                height,
                mip_levels: texture.levels.len() as u32,
            },
        );
        handle
    }

    fn link_program(&mut self, program: &ProgramLink<'_>) -> Result<ProgramHandle, DeviceError> {
        if let Some(message) = &self.link_failure {
            return Err(DeviceError::Link(message.clone()));
        }
        let handle = ProgramHandle(self.handles.next());
        self.programs.insert(
            handle,
            ProgramInfo {
                label: program.label.to_string(),
                uniform_size: program.uniform_size,
                texture_count: program.texture_count,
                variants: program.variants.iter().map(|v| v.label).collect(),
            },
        );
        Ok(handle)
    }

    fn draw(&mut self, call: &DrawCall<'_>) {
        if !self.programs.contains_key(&call.program) || !self.meshes.contains_key(&call.mesh) {
            tracing::warn!(
                program = call.program.id(),
                mesh = call.mesh.id(),
                "draw with unknown handle"
            );
        }
        self.draws.push(RecordedDraw {
            program: call.program,
            variant: call.variant,
            mesh: call.mesh,
            textures: call.textures.to_vec(),
            uniforms: call.uniforms.to_vec(),
        });
    }

    fn release_mesh(&mut self, mesh: MeshHandle) {
        self.meshes.remove(&mesh);
    }

    fn release_texture(&mut self, texture: TextureHandle) {
        self.textures.remove(&texture);
    }

    fn release_program(&mut self, program: ProgramHandle) {
        self.programs.remove(&program);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(device: &mut RecordingDevice) -> MeshHandle {
        let vertices = [0u8; 64 * 3];
        device.create_mesh(&MeshUpload {
            label: "tri",
            layout: VertexLayout::Surface,
            vertices: &vertices,
            indices: &[0, 1, 2],
        })
    }

    #[test]
    fn mesh_info_counts_vertices_by_stride() {
        let mut device = RecordingDevice::new();
        let mesh = upload(&mut device);
        let info = device.mesh_info(mesh).unwrap();
        assert_eq!(info.vertex_count, 3);
        assert_eq!(info.index_count, 3);
    }

    #[test]
    fn handles_are_unique_across_kinds() {
        let mut device = RecordingDevice::new();
        let a = upload(&mut device);
        let t = device.create_texture(&TextureUpload {
            label: "t".into(),
            levels: vec![image::RgbaImage::new(2, 2)],
        });
        let b = upload(&mut device);
        assert_ne!(a.id(), t.id());
        assert_ne!(a, b);
    }

    #[test]
    fn release_is_tolerant_of_unknown_handles() {
        let mut device = RecordingDevice::new();
        let mesh = upload(&mut device);
        device.release_mesh(mesh);
        device.release_mesh(mesh);
        device.release_texture(TextureHandle(999));
        device.release_program(ProgramHandle(999));
        assert_eq!(device.live_meshes(), 0);
    }

    #[test]
    fn failing_link_reports_message() {
        let mut device = RecordingDevice::failing_link("no GPU today");
        let err = device
            .link_program(&ProgramLink {
                label: "p",
                vertex_wgsl: "",
                fragment_wgsl: "",
                uniform_size: 16,
                texture_count: 0,
                variants: &[],
            })
            .unwrap_err();
        assert!(err.to_string().contains("no GPU today"));
        assert_eq!(device.live_programs(), 0);
    }

    #[test]
    fn take_draws_drains() {
        let mut device = RecordingDevice::new();
        let mesh = upload(&mut device);
        device.draw(&DrawCall {
            program: ProgramHandle(42),
            variant: 0,
            mesh,
            textures: &[],
            uniforms: &[1, 2, 3, 4],
        });
        assert_eq!(device.draws().len(), 1);
        let drained = device.take_draws();
        assert_eq!(drained[0].uniforms, vec![1, 2, 3, 4]);
        assert!(device.draws().is_empty());
    }
}
