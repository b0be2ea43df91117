//! Globe geometry validation.

use crate::schema::ClimaSimConfig;

use super::helpers::validate_range_f64;

pub(crate) fn validate_globe(errors: &mut Vec<String>, config: &ClimaSimConfig) {
    let globe = &config.globe;

    validate_range_f64(errors, "globe.radius", globe.radius, 0.01, 100.0);
    if globe.atmosphere_radius <= globe.radius {
        errors.push(format!(
            "globe.atmosphere_radius = {} must exceed globe.radius = {}",
            globe.atmosphere_radius, globe.radius
        ));
    }
    validate_range_f64(
        errors,
        "globe.rotation_speed",
        globe.rotation_speed,
        -360.0,
        360.0,
    );
    validate_range_f64(
        errors,
        "globe.welcome_brightness",
        globe.welcome_brightness,
        0.0,
        1.0,
    );
}
