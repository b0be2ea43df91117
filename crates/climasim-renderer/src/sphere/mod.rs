//! Globe geometry: UV sphere with tangent space, atmosphere shell, and MVP math.
//!
//! The surface mesh carries a full tangent frame plus procedural elevation
//! and moisture per vertex. The shell is a plain position/normal/uv sphere
//! drawn translucently around it.

pub mod matrix;
mod mesh;
mod types;

pub use mesh::*;
pub use types::*;
