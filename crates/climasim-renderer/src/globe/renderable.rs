//! Globe lifecycle: build, advance, draw, tear down.

use climasim_common::IssueKind;
use tracing::{debug, info, warn};

use super::settings::{GlobeSettings, GlobeTransform};
use crate::climate::ClimateVisualState;
use crate::device::{
    DrawState, GraphicsDevice, MeshHandle, MeshUpload, PipelineVariant, VertexLayout,
};
use crate::shader::{ProgramSource, ShaderError, ShaderProgram};
use crate::sphere::matrix::{self as mat, Mat4};
use crate::sphere::{build_atmosphere_shell_lod, build_sphere_lod};
use crate::texture::{SynthOptions, TextureSet, TextureSources};

/// Pipeline index of the surface draw.
pub const SURFACE_VARIANT: usize = 0;
/// Pipeline index of the atmosphere shell draw.
pub const SHELL_VARIANT: usize = 1;

/// The two pipelines the globe program links.
pub const GLOBE_VARIANTS: [PipelineVariant; 2] = [
    PipelineVariant {
        label: "globe surface",
        layout: VertexLayout::Surface,
        vertex_entry: "vs_surface",
        fragment_entry: "fs_main",
        state: DrawState::SURFACE,
    },
    PipelineVariant {
        label: "globe atmosphere",
        layout: VertexLayout::Shell,
        vertex_entry: "vs_shell",
        fragment_entry: "fs_main",
        state: DrawState::SHELL,
    },
];

/// Brightness multipliers above this are clamped.
pub const MAX_BRIGHTNESS: f32 = 4.0;

#[derive(Debug, thiserror::Error)]
pub enum GlobeError {
    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error("globe used after teardown")]
    TornDown,
}

/// Counters from the most recent [`Globe::render`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub draw_calls: u32,
    pub triangles: usize,
}

/// GPU resources, present until teardown.
struct GlobeResources {
    surface: MeshHandle,
    surface_triangles: usize,
    shell: MeshHandle,
    shell_triangles: usize,
    textures: TextureSet,
    program: ShaderProgram,
}

/// A renderable globe.
pub struct Globe {
    resources: Option<GlobeResources>,
    state: ClimateVisualState,
    transform: GlobeTransform,
    atmosphere_pass: bool,
    last_frame: FrameStats,
}

impl Globe {
    /// Build meshes, acquire and upload textures, compile the program, and
    /// start from the baseline climate. Shader failure is fatal; anything
    /// already uploaded is released before returning.
    pub fn new<D: GraphicsDevice + ?Sized>(
        device: &mut D,
        settings: &GlobeSettings,
        sources: &TextureSources,
        synth: &SynthOptions,
    ) -> Result<Self, GlobeError> {
        let surface_mesh = build_sphere_lod(settings.lod, settings.radius);
        let shell_mesh =
            build_atmosphere_shell_lod(settings.atmosphere_lod, settings.atmosphere_radius);

        let surface = device.create_mesh(&MeshUpload {
            label: "globe surface",
            layout: VertexLayout::Surface,
            vertices: surface_mesh.vertex_bytes(),
            indices: &surface_mesh.indices,
        });
        let shell = device.create_mesh(&MeshUpload {
            label: "globe atmosphere",
            layout: VertexLayout::Shell,
            vertices: shell_mesh.vertex_bytes(),
            indices: &shell_mesh.indices,
        });
        debug!(
            "globe meshes: surface {} tris, shell {} tris",
            surface_mesh.triangle_count(),
            shell_mesh.triangle_count()
        );

        let textures = TextureSet::load(device, sources, synth);

        let program =
            match ShaderProgram::compile(device, &ProgramSource::globe(), &GLOBE_VARIANTS) {
                Ok(program) => program,
                Err(e) => {
                    device.release_mesh(surface);
                    device.release_mesh(shell);
                    textures.release(device);
                    return Err(e.into());
                }
            };

        let mut state = ClimateVisualState::baseline(settings.palette);
        state.rotation_speed = settings.rotation_speed;
        state.atmosphere_radius = settings.atmosphere_radius;

        info!(
            "globe ready: {}x{} surface, radius {}, atmosphere {}",
            settings.lod.rings,
            settings.lod.sectors,
            settings.radius,
            if settings.atmosphere_pass { "on" } else { "off" }
        );

        Ok(Self {
            resources: Some(GlobeResources {
                surface,
                surface_triangles: surface_mesh.triangle_count(),
                shell,
                shell_triangles: shell_mesh.triangle_count(),
                textures,
                program,
            }),
            state,
            transform: GlobeTransform::default(),
            atmosphere_pass: settings.atmosphere_pass,
            last_frame: FrameStats::default(),
        })
    }

    /// Advance time-driven animation by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.state.tick(dt);
    }

    pub fn apply_year(&mut self, year: i32) {
        self.state.apply_year(year);
    }

    /// Apply a climate issue by id. Unknown ids are logged and ignored.
    pub fn apply_issue(&mut self, id: &str, intensity: f32) -> bool {
        self.state.apply_issue(id, intensity)
    }

    pub fn apply_issue_kind(&mut self, kind: IssueKind, intensity: f32) {
        self.state.apply_issue_kind(kind, intensity);
    }

    /// Draw the surface, then the atmosphere shell when enabled.
    ///
    /// `brightness` scales the sun for this frame only.
    pub fn render<D: GraphicsDevice + ?Sized>(
        &mut self,
        device: &mut D,
        view: &Mat4,
        projection: &Mat4,
        brightness: f32,
    ) -> Result<(), GlobeError> {
        let model = self.model_matrix();
        let brightness = clamp_brightness(brightness);
        let camera = mat::invert(view)
            .map(|inverse| mat::translation(&inverse))
            .unwrap_or([0.0; 3]);

        let res = self.resources.as_mut().ok_or(GlobeError::TornDown)?;
        let program = &mut res.program;

        program.use_program();
        write_uniforms(program, &self.state, brightness);
        program.set_mat4("model", &model);
        program.set_mat4("view", view);
        program.set_mat4("projection", projection);
        program.set_vec3("camera_position", camera);

        let textures = res.textures.handles();
        program.set_int("atmosphere_pass", 0);
        program.submit(device, res.surface, SURFACE_VARIANT, textures);
        let mut stats = FrameStats {
            draw_calls: 1,
            triangles: res.surface_triangles,
        };

        if self.atmosphere_pass {
            program.set_int("atmosphere_pass", 1);
            program.submit(device, res.shell, SHELL_VARIANT, textures);
            stats.draw_calls += 1;
            stats.triangles += res.shell_triangles;
        }
        program.unbind();

        self.last_frame = stats;
        Ok(())
    }

    /// Release every GPU resource. Later calls do nothing.
    pub fn teardown<D: GraphicsDevice + ?Sized>(&mut self, device: &mut D) {
        let Some(mut res) = self.resources.take() else {
            return;
        };
        device.release_mesh(res.surface);
        device.release_mesh(res.shell);
        res.textures.release(device);
        res.program.release(device);
        self.last_frame = FrameStats::default();
        info!("globe torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.resources.is_none()
    }

    pub fn state(&self) -> &ClimateVisualState {
        &self.state
    }

    /// Mutable access for texture modes and direct tweaks.
    pub fn state_mut(&mut self) -> &mut ClimateVisualState {
        &mut self.state
    }

    pub fn textures(&self) -> Option<&TextureSet> {
        self.resources.as_ref().map(|res| &res.textures)
    }

    pub fn program(&self) -> Option<&ShaderProgram> {
        self.resources.as_ref().map(|res| &res.program)
    }

    pub fn last_frame(&self) -> FrameStats {
        self.last_frame
    }

    pub fn transform(&self) -> GlobeTransform {
        self.transform
    }

    pub fn set_transform(&mut self, transform: GlobeTransform) {
        self.transform = transform;
    }

    pub fn set_position(&mut self, position: [f32; 3]) {
        self.transform.position = position;
    }

    pub fn set_pitch(&mut self, degrees: f32) {
        self.transform.pitch = degrees;
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.transform.scale = scale;
    }

    pub fn set_rotation_speed(&mut self, degrees_per_second: f32) {
        self.state.rotation_speed = degrees_per_second;
    }

    pub fn set_atmosphere_pass(&mut self, enabled: bool) {
        self.atmosphere_pass = enabled;
    }

    /// translate · Rx(pitch) · Ry(spin) · Rz(seasonal tilt) · scale
    pub fn model_matrix(&self) -> Mat4 {
        let t = &self.transform;
        let translate = mat::translate(t.position[0], t.position[1], t.position[2]);
        let pitch = mat::rotate_x(t.pitch.to_radians());
        let spin = mat::rotate_y(self.state.rotation_angle.to_radians());
        let tilt = mat::rotate_z(self.state.seasonal_tilt.to_radians());
        let scale = mat::scale(t.scale);

        mat::mul(
            &translate,
            &mat::mul(&pitch, &mat::mul(&spin, &mat::mul(&tilt, &scale))),
        )
    }
}

fn clamp_brightness(brightness: f32) -> f32 {
    if !brightness.is_finite() {
        warn!(brightness, "non-finite brightness, using 1.0");
        return 1.0;
    }
    let clamped = brightness.clamp(0.0, MAX_BRIGHTNESS);
    if clamped != brightness {
        warn!(brightness, clamped, "brightness out of range");
    }
    clamped
}

/// Every climate uniform, named as the shader declares them.
fn write_uniforms(program: &mut ShaderProgram, state: &ClimateVisualState, brightness: f32) {
    program.set_float("time", state.shader_time());

    program.set_vec3("sun_position", state.sun_position);
    program.set_float("sun_intensity", state.sun_intensity * brightness);
    program.set_vec3("sun_color", state.sun_color);
    program.set_vec3("ambient_color", state.ambient_color);

    program.set_float("atmosphere_density", state.atmosphere_density);
    program.set_float("atmosphere_radius", state.atmosphere_radius);
    program.set_vec3("scattering", state.scattering);
    program.set_float("ozone_intensity", state.ozone_intensity);

    program.set_vec3("ocean_color", state.ocean_color);
    program.set_float("wave_strength", state.wave_strength);
    program.set_float("wave_speed", state.wave_speed);
    program.set_float("ocean_specular", state.ocean_specular);
    program.set_float("fresnel_strength", state.fresnel_strength);

    program.set_vec2("cloud_offset", state.cloud_offset);
    program.set_float("cloud_height", state.cloud_height);
    program.set_float("cloud_density", state.cloud_density);
    program.set_float("cloud_speed", state.cloud_speed);
    program.set_float("cloud_shadowing", state.cloud_shadowing);

    program.set_vec3("ice_color", state.ice_color);
    program.set_float("ice_cap_intensity", state.ice_cap_intensity);
    program.set_float("polar_brightness", state.polar_brightness);

    program.set_vec3("city_light_color", state.city_light_color);
    program.set_float("city_light_intensity", state.city_light_intensity);
    program.set_float("night_visibility", state.night_visibility);

    program.set_float("texture_blend", state.texture_blend);
    program.set_float("climate_influence", state.climate_influence);
    program.set_float("seasonal_tilt", state.seasonal_tilt);
    program.set_float("seasonal_variation", state.seasonal_variation);

    program.set_float("climate_intensity", state.climate_intensity);
    program.set_float("vegetation_density", state.vegetation_density);
    program.set_float("desertification", state.desertification);
    program.set_float("temperature_change", state.temperature_change);
    program.set_float("ice_cap_reduction", state.ice_cap_reduction);
    program.set_float("forest_loss", state.forest_loss);
    program.set_float("ocean_acidification", state.ocean_acidification);
    program.set_float("pollution_level", state.pollution_level);
}
