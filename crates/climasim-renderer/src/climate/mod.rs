//! Climate visual state: every appearance parameter of the globe, plus the
//! transitions that move it (time, year, and climate issues).

mod dynamics;
mod issue;
mod state;
mod year;

pub use issue::*;
pub use state::*;
pub use year::*;
