//! Full configuration validation.
//!
//! Each domain has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod globe;
mod helpers;
mod misc;
mod textures;


use crate::schema::ClimaSimConfig;
use climasim_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ClimaSimConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    globe::validate_globe(&mut errors, config);
    textures::validate_textures(&mut errors, config);
    misc::validate_palette(&mut errors, config);
    misc::validate_climate(&mut errors, config);
    misc::validate_window(&mut errors, config);
    misc::validate_logging(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
