//! Globe textures: decode from disk or synthesize a seeded fallback.
//!
//! Every role has a fixed texture unit, a default size, and a channel
//! layout. Decoding passes the source layout through; GPU upload expands
//! to RGBA8 with a full CPU-built mip chain.

mod geography;
mod loader;
mod mips;
mod set;
mod synth;
mod types;

pub use geography::*;
pub use loader::*;
pub use mips::*;
pub use set::*;
pub use synth::*;
pub use types::*;
