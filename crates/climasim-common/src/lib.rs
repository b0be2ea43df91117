pub mod errors;
pub mod types;

pub use errors::{ClimaSimError, ConfigError};
pub use types::{Color, IssueKind, ParseIssueError};

pub type Result<T> = std::result::Result<T, ClimaSimError>;
