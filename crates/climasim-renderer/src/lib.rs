//! Procedural globe rendering for ClimaSim.
//!
//! The [`Globe`] owns a UV-sphere surface, an atmosphere shell, seven
//! textures (decoded or synthesized), and a WGSL program. Climate signals
//! (time, year, issues) move a [`ClimateVisualState`] that is uploaded as
//! uniforms every frame. All GPU work goes through [`GraphicsDevice`], so
//! the globe runs against wgpu or headless against a [`RecordingDevice`].

pub mod climate;
pub mod device;
pub mod globe;
pub mod gpu;
pub mod perf;
pub mod render_state;
pub mod shader;
pub mod sphere;
pub mod texture;

pub use climate::{ClimateVisualState, Palette};
pub use device::{GraphicsDevice, RecordingDevice, WgpuDevice};
pub use globe::{Globe, GlobeError, GlobeSettings, GlobeTransform};
pub use gpu::GpuContext;
pub use perf::FrameTimer;
pub use render_state::RenderState;
pub use shader::{ProgramSource, ShaderError, ShaderProgram};
pub use texture::{SynthOptions, TextureRole, TextureSources};
