//! Reading config files.

use std::path::Path;

use climasim_common::ConfigError;
use tracing::{info, warn};

use crate::schema::ClimaSimConfig;
use crate::validation;

use super::paths::{create_default_config, default_config_path};

/// Parse a TOML config file. Missing fields take their defaults.
///
/// Values that fail validation are logged and kept; callers that need a
/// valid config run [`validation::validate`] themselves.
pub fn load_from_path(path: &Path) -> Result<ClimaSimConfig, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "failed to read {}: {e}",
                path.display()
            )));
        }
    };

    let config: ClimaSimConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config {} has invalid values: {e}", path.display());
    }

    info!("config loaded from {}", path.display());
    Ok(config)
}

/// Load from [`default_config_path`], writing the template and returning
/// defaults on first run.
pub fn load_default() -> Result<ClimaSimConfig, ConfigError> {
    let path = default_config_path()?;
    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            info!("first run: no config at {}", path.display());
            create_default_config(&path)?;
            Ok(ClimaSimConfig::default())
        }
        other => other,
    }
}
