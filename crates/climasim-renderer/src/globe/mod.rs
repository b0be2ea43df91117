//! The globe renderable: surface mesh, atmosphere shell, seven textures,
//! one shader program, and the climate state that drives them.

mod renderable;
mod settings;
#[cfg(test)]
mod tests;

pub use renderable::*;
pub use settings::*;
