//! Texture asset and synthesis validation.

use crate::schema::ClimaSimConfig;

use super::helpers::validate_range;

pub(crate) fn validate_textures(errors: &mut Vec<String>, config: &ClimaSimConfig) {
    if let Some(size) = config.textures.synth_resolution {
        validate_range(errors, "textures.synth_resolution", size, 16, 4096);
        if !size.is_power_of_two() {
            errors.push(format!(
                "textures.synth_resolution = {size} must be a power of two"
            ));
        }
    }
}
