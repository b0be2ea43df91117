//! Configuration schema types for ClimaSim.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the values the globe ships with.

mod climate;
mod globe;
mod palette;
mod textures;
mod window;

pub use climate::*;
pub use globe::*;
pub use palette::*;
pub use textures::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for ClimaSim.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimaSimConfig {
    pub globe: GlobeConfig,
    pub textures: TextureConfig,
    pub palette: PaletteConfig,
    pub climate: ClimateConfig,
    pub window: WindowConfig,
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive applied when `--log-level` is not given.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
