//! Compile, link, bind, and submit a shader program.

use tracing::{debug, info, warn};

use super::error::{ShaderError, ShaderStage};
use super::reflect::{reflect_texture_count, reflect_uniform_block};
use super::uniforms::UniformBlock;
use crate::device::{
    DrawCall, GraphicsDevice, MeshHandle, PipelineVariant, ProgramHandle, ProgramLink,
    TextureHandle,
};

const GLOBE_COMMON: &str = include_str!("../shaders/globe_common.wgsl");
const GLOBE_VERTEX: &str = include_str!("../shaders/globe_vertex.wgsl");
const GLOBE_FRAGMENT: &str = include_str!("../shaders/globe_fragment.wgsl");

/// WGSL text for both stages of one program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSource {
    pub label: String,
    pub vertex: String,
    pub fragment: String,
}

impl ProgramSource {
    pub fn new(
        label: impl Into<String>,
        vertex: impl Into<String>,
        fragment: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// The bundled globe program. Both stages share the uniform block and
    /// texture declarations.
    pub fn globe() -> Self {
        Self::new(
            "globe",
            format!("{GLOBE_COMMON}\n{GLOBE_VERTEX}"),
            format!("{GLOBE_COMMON}\n{GLOBE_FRAGMENT}"),
        )
    }
}

/// A linked program plus its staging uniform block.
#[derive(Debug)]
pub struct ShaderProgram {
    label: String,
    handle: Option<ProgramHandle>,
    uniforms: UniformBlock,
    texture_count: u32,
    bound: bool,
}

impl ShaderProgram {
    /// Compile both stages, reflect the uniform block, and link one
    /// pipeline per variant on `device`.
    pub fn compile<D: GraphicsDevice + ?Sized>(
        device: &mut D,
        source: &ProgramSource,
        variants: &[PipelineVariant],
    ) -> Result<Self, ShaderError> {
        let vertex = compile_stage(ShaderStage::Vertex, &source.vertex)?;
        let fragment = compile_stage(ShaderStage::Fragment, &source.fragment)?;

        for variant in variants {
            require_entry_point(&vertex, variant.vertex_entry, naga::ShaderStage::Vertex)?;
            require_entry_point(&fragment, variant.fragment_entry, naga::ShaderStage::Fragment)?;
        }

        let vertex_block = reflect_uniform_block(&vertex).map_err(link_error)?;
        let fragment_block = reflect_uniform_block(&fragment).map_err(link_error)?;
        let layout = match (vertex_block, fragment_block) {
            (Some(v), Some(f)) if v != f => {
                return Err(link_error(
                    "vertex and fragment stages declare different uniform blocks",
                ));
            }
            (Some(layout), _) | (None, Some(layout)) => layout,
            (None, None) => return Err(link_error("no uniform block at group 0, binding 0")),
        };
        let texture_count = reflect_texture_count(&fragment);

        let handle = device
            .link_program(&ProgramLink {
                label: &source.label,
                vertex_wgsl: &source.vertex,
                fragment_wgsl: &source.fragment,
                uniform_size: layout.size as u64,
                texture_count,
                variants,
            })
            .map_err(|e| link_error(e.to_string()))?;

        info!(
            "shader program '{}' linked ({} uniforms, {} textures, {} variants)",
            source.label,
            layout.len(),
            texture_count,
            variants.len()
        );

        Ok(Self {
            label: source.label.clone(),
            handle: Some(handle),
            uniforms: UniformBlock::new(layout),
            texture_count,
            bound: false,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn handle(&self) -> Option<ProgramHandle> {
        self.handle
    }

    pub fn texture_count(&self) -> u32 {
        self.texture_count
    }

    pub fn use_program(&mut self) {
        self.bound = true;
    }

    pub fn unbind(&mut self) {
        self.bound = false;
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn block(&self) -> &UniformBlock {
        &self.uniforms
    }

    pub fn set_float(&mut self, name: &str, value: f32) {
        self.uniforms.set_float(name, value);
    }

    pub fn set_int(&mut self, name: &str, value: i32) {
        self.uniforms.set_int(name, value);
    }

    pub fn set_vec2(&mut self, name: &str, value: [f32; 2]) {
        self.uniforms.set_vec2(name, value);
    }

    pub fn set_vec3(&mut self, name: &str, value: [f32; 3]) {
        self.uniforms.set_vec3(name, value);
    }

    pub fn set_mat4(&mut self, name: &str, value: &[f32; 16]) {
        self.uniforms.set_mat4(name, value);
    }

    /// Queue one draw of `mesh` with the current uniform values.
    pub fn submit<D: GraphicsDevice + ?Sized>(
        &self,
        device: &mut D,
        mesh: MeshHandle,
        variant: usize,
        textures: &[TextureHandle],
    ) {
        let Some(program) = self.handle else {
            warn!("submit on released program '{}'", self.label);
            return;
        };
        if !self.bound {
            warn!("submit on program '{}' while unbound", self.label);
            return;
        }

        device.draw(&DrawCall {
            program,
            variant,
            mesh,
            textures,
            uniforms: self.uniforms.bytes(),
        });
    }

    /// Release the linked program. Safe to call more than once.
    pub fn release<D: GraphicsDevice + ?Sized>(&mut self, device: &mut D) {
        if let Some(handle) = self.handle.take() {
            device.release_program(handle);
            self.bound = false;
            debug!("shader program '{}' released", self.label);
        }
    }
}

fn compile_stage(stage: ShaderStage, source: &str) -> Result<naga::Module, ShaderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderError::Compile {
        stage,
        diagnostic: e.emit_to_string(source),
    })?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    )
    .validate(&module)
    .map_err(|e| ShaderError::Compile {
        stage,
        diagnostic: e.emit_to_string(source),
    })?;

    Ok(module)
}

fn require_entry_point(
    module: &naga::Module,
    name: &str,
    stage: naga::ShaderStage,
) -> Result<(), ShaderError> {
    if module
        .entry_points
        .iter()
        .any(|ep| ep.name == name && ep.stage == stage)
    {
        Ok(())
    } else {
        Err(link_error(format!("missing {stage:?} entry point '{name}'")))
    }
}

fn link_error(diagnostic: impl Into<String>) -> ShaderError {
    ShaderError::Link {
        diagnostic: diagnostic.into(),
    }
}
