//! Where the config file lives, and writing the commented template there.

use std::path::{Path, PathBuf};

use climasim_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

const APP_DIR: &str = "climasim";
const FILE_NAME: &str = "config.toml";

fn io_failure(action: &str, path: &Path, e: std::io::Error) -> ConfigError {
    ConfigError::ParseError(format!("failed to {action} {}: {e}", path.display()))
}

/// `<platform config dir>/climasim/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(FILE_NAME))
        .ok_or_else(|| ConfigError::ParseError("no platform config directory".into()))
}

/// Write the commented default template to `path`, creating parent
/// directories as needed.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_failure("create", parent, e))?;
    }
    std::fs::write(path, default_config_toml()).map_err(|e| io_failure("write", path, e))?;

    info!("wrote default config to {}", path.display());
    Ok(())
}
