//! WGSL shader programs with a name-keyed uniform interface.
//!
//! Stages are parsed and validated with naga before the device sees them,
//! so compile errors carry a source-annotated diagnostic. The uniform block
//! at group 0, binding 0 is reflected into a slot table that the typed
//! setters write through.

mod error;
mod program;
mod reflect;
mod uniforms;

pub use error::*;
pub use program::*;
pub use reflect::*;
pub use uniforms::*;
