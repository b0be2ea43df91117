//! Palette, climate, window, and logging validation.

use crate::schema::ClimaSimConfig;

use super::helpers::{validate_color, validate_range, validate_range_f64};

pub(crate) fn validate_palette(errors: &mut Vec<String>, config: &ClimaSimConfig) {
    let palette = &config.palette;
    validate_color(errors, "palette.ocean", &palette.ocean);
    validate_color(errors, "palette.ice", &palette.ice);
    validate_color(errors, "palette.city_lights", &palette.city_lights);
    validate_color(errors, "palette.sun", &palette.sun);
    validate_color(errors, "palette.ambient", &palette.ambient);
}

pub(crate) fn validate_climate(errors: &mut Vec<String>, config: &ClimaSimConfig) {
    let year = config.climate.start_year;
    if !(1900..=2100).contains(&year) {
        errors.push(format!(
            "climate.start_year = {year} is out of range [1900, 2100]"
        ));
    }
    validate_range_f64(
        errors,
        "climate.issue_intensity",
        config.climate.issue_intensity,
        0.0,
        1.0,
    );
    validate_range(errors, "climate.year_step", config.climate.year_step, 1, 50);
}

pub(crate) fn validate_window(errors: &mut Vec<String>, config: &ClimaSimConfig) {
    validate_range(errors, "window.width", config.window.width, 320, 8192);
    validate_range(errors, "window.height", config.window.height, 320, 8192);
}

pub(crate) fn validate_logging(errors: &mut Vec<String>, config: &ClimaSimConfig) {
    if config.logging.level.trim().is_empty() {
        errors.push("logging.level must not be empty".into());
    }
}
