//! Sphere mesh vertex types and buffer layouts.

use climasim_config::MeshDetail;

/// A single vertex of the globe surface.
///
/// Layout: position(vec3) + normal(vec3) + uv(vec2) + tangent(vec3)
/// + bitangent(vec3) + elevation(f32) + moisture(f32) = 64 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub tangent: [f32; 3],
    pub bitangent: [f32; 3],
    pub elevation: f32,
    pub moisture: f32,
}

impl GlobeVertex {
    /// wgpu vertex buffer layout for `GlobeVertex`.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<GlobeVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position: vec3<f32> at offset 0
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            },
            // normal: vec3<f32> at offset 12
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 12,
                shader_location: 1,
            },
            // uv: vec2<f32> at offset 24
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 24,
                shader_location: 2,
            },
            // tangent: vec3<f32> at offset 32
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 32,
                shader_location: 3,
            },
            // bitangent: vec3<f32> at offset 44
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 44,
                shader_location: 4,
            },
            // elevation: f32 at offset 56
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32,
                offset: 56,
                shader_location: 5,
            },
            // moisture: f32 at offset 60
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32,
                offset: 60,
                shader_location: 6,
            },
        ],
    };
}

/// A single vertex of the atmosphere shell.
///
/// Layout: position(vec3) + normal(vec3) + uv(vec2) = 32 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShellVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl ShellVertex {
    /// wgpu vertex buffer layout for `ShellVertex`.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<ShellVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 12,
                shader_location: 1,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 24,
                shader_location: 2,
            },
        ],
    };
}

/// Indexed triangle mesh ready for upload.
#[derive(Debug, Clone)]
pub struct Mesh<V> {
    pub vertices: Vec<V>,
    pub indices: Vec<u32>,
}

impl<V: bytemuck::Pod> Mesh<V> {
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

pub type GlobeMesh = Mesh<GlobeVertex>;
pub type ShellMesh = Mesh<ShellVertex>;

/// Sphere tessellation presets matching `MeshDetail` config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SphereLod {
    pub rings: u32,
    pub sectors: u32,
}

impl SphereLod {
    pub const LOW: Self = Self {
        rings: 32,
        sectors: 64,
    };
    pub const MEDIUM: Self = Self {
        rings: 64,
        sectors: 128,
    };
    pub const HIGH: Self = Self {
        rings: 128,
        sectors: 256,
    };
    pub const ULTRA: Self = Self {
        rings: 200,
        sectors: 400,
    };

    pub fn from_detail(detail: MeshDetail) -> Self {
        let (rings, sectors) = detail.resolution();
        Self { rings, sectors }
    }
}

// =============================================================================
// Tests
// =============================================================================
