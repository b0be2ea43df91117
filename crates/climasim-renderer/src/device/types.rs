//! Handles and descriptors passed across the device seam.

/// Depth attachment format shared by every globe pipeline.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub(crate) u32);

        impl $name {
            pub fn id(self) -> u32 {
                self.0
            }
        }
    };
}

handle!(
    /// A mesh owned by a device.
    MeshHandle
);
handle!(
    /// A texture owned by a device.
    TextureHandle
);
handle!(
    /// A linked program owned by a device.
    ProgramHandle
);

/// Monotonic id source; ids are never reused.
#[derive(Debug, Default)]
pub(crate) struct HandleAllocator {
    next: u32,
}

impl HandleAllocator {
    pub(crate) fn next(&mut self) -> u32 {
        self.next = self.next.wrapping_add(1);
        self.next
    }
}

/// Which vertex struct a mesh holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexLayout {
    /// [`GlobeVertex`](crate::sphere::GlobeVertex)
    Surface,
    /// [`ShellVertex`](crate::sphere::ShellVertex)
    Shell,
}

impl VertexLayout {
    pub fn buffer_layout(self) -> wgpu::VertexBufferLayout<'static> {
        match self {
            VertexLayout::Surface => crate::sphere::GlobeVertex::LAYOUT,
            VertexLayout::Shell => crate::sphere::ShellVertex::LAYOUT,
        }
    }

    pub fn stride(self) -> u64 {
        self.buffer_layout().array_stride
    }
}

pub struct MeshUpload<'a> {
    pub label: &'a str,
    pub layout: VertexLayout,
    pub vertices: &'a [u8],
    pub indices: &'a [u32],
}

pub struct TextureUpload {
    pub label: String,
    /// Level 0 first.
    pub levels: Vec<image::RgbaImage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    Replace,
    Alpha,
}

/// Fixed-function state of one pipeline variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawState {
    pub depth_test: bool,
    pub depth_write: bool,
    pub cull_back_faces: bool,
    pub blend: BlendMode,
}

impl DrawState {
    /// Opaque-ish surface: depth tested and written, back faces culled.
    pub const SURFACE: Self = Self {
        depth_test: true,
        depth_write: true,
        cull_back_faces: true,
        blend: BlendMode::Alpha,
    };

    /// Translucent shell: depth tested, not written.
    pub const SHELL: Self = Self {
        depth_test: true,
        depth_write: false,
        cull_back_faces: true,
        blend: BlendMode::Alpha,
    };
}

/// One pipeline a program links: vertex layout, entry points, and state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineVariant {
    pub label: &'static str,
    pub layout: VertexLayout,
    pub vertex_entry: &'static str,
    pub fragment_entry: &'static str,
    pub state: DrawState,
}

/// Compiled stages ready to link.
pub struct ProgramLink<'a> {
    pub label: &'a str,
    pub vertex_wgsl: &'a str,
    pub fragment_wgsl: &'a str,
    /// Size in bytes of the uniform block at group 0, binding 0.
    pub uniform_size: u64,
    /// Textures at group 1, bindings `0..texture_count`; sampler follows.
    pub texture_count: u32,
    pub variants: &'a [PipelineVariant],
}

pub struct DrawCall<'a> {
    pub program: ProgramHandle,
    pub variant: usize,
    pub mesh: MeshHandle,
    pub textures: &'a [TextureHandle],
    pub uniforms: &'a [u8],
}

#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("program link failed: {0}")]
    Link(String),
}
