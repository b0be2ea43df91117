//! wgpu implementation of the device seam.
//!
//! Resources live in [`GpuResources`], owned by the render state. A
//! [`WgpuDevice`] borrows them together with the wgpu device and queue for
//! the duration of a frame or of globe construction. Draws write their
//! uniform snapshot into a per-program dynamic-offset buffer immediately
//! and are encoded into one depth-tested pass by [`GpuResources::encode`].

use std::collections::HashMap;
use std::num::NonZeroU64;

use tracing::{debug, warn};

use super::types::{
    BlendMode, DeviceError, DrawCall, HandleAllocator, MeshHandle, MeshUpload, PipelineVariant,
    ProgramHandle, ProgramLink, TextureHandle, TextureUpload, DEPTH_FORMAT,
};
use super::GraphicsDevice;

/// Uniform snapshots one program can hold per frame.
const MAX_DRAWS_PER_FRAME: u32 = 16;

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

struct GpuTexture {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

struct GpuProgram {
    pipelines: Vec<wgpu::RenderPipeline>,
    texture_layout: wgpu::BindGroupLayout,
    texture_count: u32,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    uniform_size: u64,
    uniform_stride: u64,
    texture_bind_groups: HashMap<Vec<TextureHandle>, wgpu::BindGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingDraw {
    program: ProgramHandle,
    variant: usize,
    mesh: MeshHandle,
    textures: Vec<TextureHandle>,
    offset: u32,
}

/// Draws queued for the next pass and the uniform slots they occupy.
#[derive(Debug, Default)]
struct FrameQueue {
    draws: Vec<PendingDraw>,
    slots: HashMap<ProgramHandle, u32>,
}

impl FrameQueue {
    /// Claim the next uniform slot of `program`, or `None` when its buffer
    /// is full for this frame.
    fn reserve_slot(&mut self, program: ProgramHandle) -> Option<u32> {
        let used = self.slots.entry(program).or_insert(0);
        if *used >= MAX_DRAWS_PER_FRAME {
            return None;
        }
        let slot = *used;
        *used += 1;
        Some(slot)
    }

    fn push(&mut self, draw: PendingDraw) {
        self.draws.push(draw);
    }

    fn len(&self) -> usize {
        self.draws.len()
    }

    /// Hand the queued draws to the encoder and free every slot.
    fn take(&mut self) -> Vec<PendingDraw> {
        self.slots.clear();
        std::mem::take(&mut self.draws)
    }

    /// Drop the queued draws without encoding them. Returns how many.
    fn discard(&mut self) -> usize {
        self.take().len()
    }

    fn forget_program(&mut self, program: ProgramHandle) {
        self.draws.retain(|draw| draw.program != program);
        self.slots.remove(&program);
    }
}

/// GPU-side meshes, textures, programs, and the frame's queued draws.
pub struct GpuResources {
    color_format: wgpu::TextureFormat,
    sampler: wgpu::Sampler,
    handles: HandleAllocator,
    meshes: HashMap<MeshHandle, GpuMesh>,
    textures: HashMap<TextureHandle, GpuTexture>,
    programs: HashMap<ProgramHandle, GpuProgram>,
    pending: FrameQueue,
}

impl GpuResources {
    pub fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> Self {
        // Repeat around the globe, clamp at the poles.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("globe sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            color_format,
            sampler,
            handles: HandleAllocator::default(),
            meshes: HashMap::new(),
            textures: HashMap::new(),
            programs: HashMap::new(),
            pending: FrameQueue::default(),
        }
    }

    pub fn pending_draws(&self) -> usize {
        self.pending.len()
    }

    /// Drop the draws queued for a frame that will not be presented, so
    /// they are not replayed over the next one.
    pub fn discard_pending(&mut self) {
        let dropped = self.pending.discard();
        if dropped > 0 {
            debug!("discarded {dropped} queued draws");
        }
    }

    /// Record every queued draw into one render pass that clears `color`
    /// and `depth`, then reset per-frame uniform slots.
    pub fn encode(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        color: &wgpu::TextureView,
        depth: &wgpu::TextureView,
        clear: wgpu::Color,
    ) {
        let pending = self.pending.take();
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("globe pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            for draw in &pending {
                let (Some(program), Some(mesh)) =
                    (self.programs.get(&draw.program), self.meshes.get(&draw.mesh))
                else {
                    continue;
                };
                let Some(textures) = program.texture_bind_groups.get(&draw.textures) else {
                    continue;
                };

                pass.set_pipeline(&program.pipelines[draw.variant]);
                pass.set_bind_group(0, &program.uniform_bind_group, &[draw.offset]);
                pass.set_bind_group(1, textures, &[]);
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }
    }
}

/// A [`GraphicsDevice`] over borrowed wgpu state.
pub struct WgpuDevice<'a> {
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
    resources: &'a mut GpuResources,
}

impl<'a> WgpuDevice<'a> {
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        resources: &'a mut GpuResources,
    ) -> Self {
        Self {
            device,
            queue,
            resources,
        }
    }

    fn create_pipeline(
        &self,
        layout: &wgpu::PipelineLayout,
        vertex: &wgpu::ShaderModule,
        fragment: &wgpu::ShaderModule,
        variant: &PipelineVariant,
    ) -> wgpu::RenderPipeline {
        let state = variant.state;
        let blend = match state.blend {
            BlendMode::Replace => wgpu::BlendState::REPLACE,
            BlendMode::Alpha => wgpu::BlendState::ALPHA_BLENDING,
        };

        self.device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(variant.label),
                layout: Some(layout),
                vertex: wgpu::VertexState {
                    module: vertex,
                    entry_point: Some(variant.vertex_entry),
                    buffers: &[variant.layout.buffer_layout()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: fragment,
                    entry_point: Some(variant.fragment_entry),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: self.resources.color_format,
                        blend: Some(blend),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: state.cull_back_faces.then_some(wgpu::Face::Back),
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: state.depth_write,
                    depth_compare: if state.depth_test {
                        wgpu::CompareFunction::Less
                    } else {
                        wgpu::CompareFunction::Always
                    },
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
    }

    fn texture_bind_group(
        &self,
        layout: &wgpu::BindGroupLayout,
        textures: &[TextureHandle],
    ) -> Option<wgpu::BindGroup> {
        let mut entries = Vec::with_capacity(textures.len() + 1);
        for (binding, handle) in textures.iter().enumerate() {
            let texture = self.resources.textures.get(handle)?;
            entries.push(wgpu::BindGroupEntry {
                binding: binding as u32,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            });
        }
        entries.push(wgpu::BindGroupEntry {
            binding: textures.len() as u32,
            resource: wgpu::BindingResource::Sampler(&self.resources.sampler),
        });

        Some(self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globe texture bind group"),
            layout,
            entries: &entries,
        }))
    }
}

fn align_up(value: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    value.div_ceil(alignment) * alignment
}

impl GraphicsDevice for WgpuDevice<'_> {
    fn create_mesh(&mut self, mesh: &MeshUpload<'_>) -> MeshHandle {
        use wgpu::util::DeviceExt;

        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(mesh.label),
                contents: mesh.vertices,
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(mesh.label),
                contents: bytemuck::cast_slice(mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        let handle = MeshHandle(self.resources.handles.next());
        self.resources.meshes.insert(
            handle,
            GpuMesh {
                vertex_buffer,
                index_buffer,
                index_count: mesh.indices.len() as u32,
            },
        );
        debug!(
            "uploaded mesh '{}' ({} bytes, {} indices)",
            mesh.label,
            mesh.vertices.len(),
            mesh.indices.len()
        );
        handle
    }

    fn create_texture(&mut self, upload: &TextureUpload) -> TextureHandle {
        let fallback;
        let levels: &[image::RgbaImage] = if upload.levels.is_empty() {
            warn!("texture '{}' has no levels, uploading 1x1 placeholder", upload.label);
            fallback = [image::RgbaImage::from_pixel(1, 1, image::Rgba([255, 0, 255, 255]))];
            &fallback
        } else {
            &upload.levels
        };

        let (width, height) = levels[0].dimensions();
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&upload.label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: levels.len() as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (level, image) in levels.iter().enumerate() {
            let (w, h) = image.dimensions();
            self.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                image.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * w),
                    rows_per_image: Some(h),
                },
                wgpu::Extent3d {
                    width: w,
                    height: h,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let handle = TextureHandle(self.resources.handles.next());
        self.resources.textures.insert(
            handle,
            GpuTexture {
                _texture: texture,
                view,
            },
        );
        handle
    }

    fn link_program(&mut self, link: &ProgramLink<'_>) -> Result<ProgramHandle, DeviceError> {
        let uniform_size = NonZeroU64::new(link.uniform_size)
            .ok_or_else(|| DeviceError::Link("uniform block is empty".into()))?;

        self.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let vertex = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(link.label),
                source: wgpu::ShaderSource::Wgsl(link.vertex_wgsl.into()),
            });
        let fragment = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(link.label),
                source: wgpu::ShaderSource::Wgsl(link.fragment_wgsl.into()),
            });

        let uniform_layout = self
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("globe uniform layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: Some(uniform_size),
                    },
                    count: None,
                }],
            });

        let mut texture_entries: Vec<wgpu::BindGroupLayoutEntry> = (0..link.texture_count)
            .map(|binding| wgpu::BindGroupLayoutEntry {
                binding,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            })
            .collect();
        texture_entries.push(wgpu::BindGroupLayoutEntry {
            binding: link.texture_count,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        });
        let texture_layout = self
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("globe texture layout"),
                entries: &texture_entries,
            });

        let pipeline_layout = self
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(link.label),
                bind_group_layouts: &[&uniform_layout, &texture_layout],
                push_constant_ranges: &[],
            });

        let pipelines: Vec<wgpu::RenderPipeline> = link
            .variants
            .iter()
            .map(|variant| self.create_pipeline(&pipeline_layout, &vertex, &fragment, variant))
            .collect();

        let alignment = self.device.limits().min_uniform_buffer_offset_alignment as u64;
        let uniform_stride = align_up(link.uniform_size, alignment);
        let uniform_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globe uniforms"),
            size: uniform_stride * MAX_DRAWS_PER_FRAME as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let uniform_bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globe uniform bind group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &uniform_buffer,
                    offset: 0,
                    size: Some(uniform_size),
                }),
            }],
        });

        if let Some(error) = pollster::block_on(self.device.pop_error_scope()) {
            return Err(DeviceError::Link(error.to_string()));
        }

        let handle = ProgramHandle(self.resources.handles.next());
        self.resources.programs.insert(
            handle,
            GpuProgram {
                pipelines,
                texture_layout,
                texture_count: link.texture_count,
                uniform_buffer,
                uniform_bind_group,
                uniform_size: link.uniform_size,
                uniform_stride,
                texture_bind_groups: HashMap::new(),
            },
        );
        debug!(
            "linked program '{}' ({} pipelines, {} byte uniforms)",
            link.label,
            link.variants.len(),
            link.uniform_size
        );
        Ok(handle)
    }

    fn draw(&mut self, call: &DrawCall<'_>) {
        if !self.resources.meshes.contains_key(&call.mesh) {
            warn!(mesh = call.mesh.id(), "draw skipped: unknown mesh");
            return;
        }
        let Some(program) = self.resources.programs.get(&call.program) else {
            warn!(program = call.program.id(), "draw skipped: unknown program");
            return;
        };
        if call.variant >= program.pipelines.len() {
            warn!(variant = call.variant, "draw skipped: unknown pipeline variant");
            return;
        }
        if call.textures.len() != program.texture_count as usize {
            warn!(
                "draw skipped: {} textures bound, program expects {}",
                call.textures.len(),
                program.texture_count
            );
            return;
        }

        let key = call.textures.to_vec();
        let bind_group = if program.texture_bind_groups.contains_key(&key) {
            None
        } else {
            match self.texture_bind_group(&program.texture_layout, &key) {
                Some(group) => Some(group),
                None => {
                    warn!("draw skipped: unknown texture handle");
                    return;
                }
            }
        };

        let Some(program) = self.resources.programs.get_mut(&call.program) else {
            return;
        };
        if let Some(group) = bind_group {
            program.texture_bind_groups.insert(key.clone(), group);
        }

        let Some(slot) = self.resources.pending.reserve_slot(call.program) else {
            warn!("draw skipped: more than {MAX_DRAWS_PER_FRAME} draws this frame");
            return;
        };
        let offset = slot as u64 * program.uniform_stride;
        let len = call.uniforms.len().min(program.uniform_size as usize);
        self.queue
            .write_buffer(&program.uniform_buffer, offset, &call.uniforms[..len]);

        self.resources.pending.push(PendingDraw {
            program: call.program,
            variant: call.variant,
            mesh: call.mesh,
            textures: key,
            offset: offset as u32,
        });
    }

    fn release_mesh(&mut self, mesh: MeshHandle) {
        self.resources.meshes.remove(&mesh);
    }

    fn release_texture(&mut self, texture: TextureHandle) {
        if self.resources.textures.remove(&texture).is_some() {
            for program in self.resources.programs.values_mut() {
                program
                    .texture_bind_groups
                    .retain(|key, _| !key.contains(&texture));
            }
        }
    }

    fn release_program(&mut self, program: ProgramHandle) {
        self.resources.programs.remove(&program);
        self.resources.pending.forget_program(program);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_up_rounds_to_boundary() {
        assert_eq!(align_up(1, 256), 256);
        assert_eq!(align_up(256, 256), 256);
        assert_eq!(align_up(257, 256), 512);
        assert_eq!(align_up(10, 0), 10);
    }

    fn queued(program: ProgramHandle, offset: u32) -> PendingDraw {
        PendingDraw {
            program,
            variant: 0,
            mesh: MeshHandle(1),
            textures: Vec::new(),
            offset,
        }
    }

    #[test]
    fn slots_run_out_per_program() {
        let mut queue = FrameQueue::default();
        let a = ProgramHandle(1);
        let b = ProgramHandle(2);
        for expected in 0..MAX_DRAWS_PER_FRAME {
            assert_eq!(queue.reserve_slot(a), Some(expected));
        }
        assert_eq!(queue.reserve_slot(a), None);
        assert_eq!(queue.reserve_slot(b), Some(0));
    }

    #[test]
    fn take_frees_slots() {
        let mut queue = FrameQueue::default();
        let program = ProgramHandle(1);
        let slot = queue.reserve_slot(program).unwrap();
        queue.push(queued(program, slot));
        assert_eq!(queue.take().len(), 1);
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.reserve_slot(program), Some(0));
    }

    #[test]
    fn unpresented_frame_leaves_nothing_queued() {
        let mut queue = FrameQueue::default();
        let program = ProgramHandle(1);

        // A frame that queues surface and shell draws, then fails to acquire.
        for _ in 0..2 {
            let slot = queue.reserve_slot(program).unwrap();
            queue.push(queued(program, slot));
        }
        assert_eq!(queue.discard(), 2);

        // The next frame starts at slot zero and encodes only its own draws.
        for expected in 0..2 {
            let slot = queue.reserve_slot(program).unwrap();
            assert_eq!(slot, expected);
            queue.push(queued(program, slot));
        }
        let draws = queue.take();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].offset, 0);
    }

    #[test]
    fn repeated_failures_never_fill_the_buffer() {
        let mut queue = FrameQueue::default();
        let program = ProgramHandle(1);
        for _ in 0..(MAX_DRAWS_PER_FRAME * 2) {
            for _ in 0..2 {
                let slot = queue.reserve_slot(program).unwrap();
                queue.push(queued(program, slot));
            }
            queue.discard();
        }
        assert!(queue.reserve_slot(program).is_some());
    }

    #[test]
    fn forgetting_a_program_drops_its_draws() {
        let mut queue = FrameQueue::default();
        let a = ProgramHandle(1);
        let b = ProgramHandle(2);
        queue.push(queued(a, 0));
        queue.push(queued(b, 0));
        queue.forget_program(a);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.take()[0].program, b);
    }
}
