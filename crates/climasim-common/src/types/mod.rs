mod color;
mod issue;

pub use color::*;
pub use issue::*;
