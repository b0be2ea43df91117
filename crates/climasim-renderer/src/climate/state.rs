//! The globe's appearance parameters and their valid ranges.

use climasim_common::Color;
use climasim_config::schema::PaletteConfig;
use tracing::warn;

/// Baseline colours the year and issue transitions start from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub ocean: [f32; 3],
    pub ice: [f32; 3],
    pub city_lights: [f32; 3],
    pub sun: [f32; 3],
    pub ambient: [f32; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            ocean: [0.1, 0.3, 0.6],
            ice: [0.9, 0.95, 1.0],
            city_lights: [1.0, 0.8, 0.4],
            sun: [1.0, 0.95, 0.8],
            ambient: [0.1, 0.15, 0.3],
        }
    }
}

impl Palette {
    /// Parse the configured hex colours. Unparseable entries keep the
    /// built-in colour.
    pub fn from_config(config: &PaletteConfig) -> Self {
        let defaults = Self::default();
        let parse = |name: &str, hex: &str, fallback: [f32; 3]| match Color::from_hex(hex) {
            Some(color) => color.to_rgb_f32(),
            None => {
                warn!("palette.{name} '{hex}' is not a colour, using default");
                fallback
            }
        };

        Self {
            ocean: parse("ocean", &config.ocean, defaults.ocean),
            ice: parse("ice", &config.ice, defaults.ice),
            city_lights: parse("city_lights", &config.city_lights, defaults.city_lights),
            sun: parse("sun", &config.sun, defaults.sun),
            ambient: parse("ambient", &config.ambient, defaults.ambient),
        }
    }
}

/// Everything the globe shader needs to know about the climate.
///
/// Mutated by [`tick`](Self::tick), [`apply_year`](Self::apply_year), and
/// [`apply_issue`](Self::apply_issue); each transition ends with
/// [`clamp_ranges`](Self::clamp_ranges).
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateVisualState {
    pub palette: Palette,

    // Lighting
    pub sun_position: [f32; 3],
    pub sun_intensity: f32,
    pub sun_color: [f32; 3],
    pub ambient_color: [f32; 3],

    // Atmosphere
    pub atmosphere_radius: f32,
    /// Oscillates around `atmosphere_baseline`.
    pub atmosphere_density: f32,
    pub atmosphere_baseline: f32,
    pub ozone_intensity: f32,
    pub scattering: [f32; 3],

    // Ocean
    pub wave_strength: f32,
    pub wave_speed: f32,
    pub ocean_specular: f32,
    pub fresnel_strength: f32,
    pub ocean_color: [f32; 3],

    // Clouds
    pub cloud_height: f32,
    pub cloud_density: f32,
    pub cloud_speed: f32,
    pub cloud_offset: [f32; 2],
    pub cloud_shadowing: f32,

    // Ice
    pub ice_cap_intensity: f32,
    pub ice_color: [f32; 3],
    pub polar_brightness: f32,

    // Cities
    pub city_light_intensity: f32,
    pub city_light_color: [f32; 3],
    pub night_visibility: f32,

    // Texture mixing
    pub texture_blend: f32,
    pub climate_influence: f32,

    // Seasons, in degrees
    pub axial_tilt: f32,
    pub seasonal_tilt: f32,
    pub seasonal_variation: f32,

    // Climate magnitudes
    pub climate_intensity: f32,
    pub vegetation_density: f32,
    pub desertification: f32,
    /// Degrees Celsius above pre-industrial.
    pub temperature_change: f32,
    pub ice_cap_reduction: f32,
    pub forest_loss: f32,
    pub ocean_acidification: f32,
    pub pollution_level: f32,

    // Motion
    pub rotation_angle: f32,
    /// Degrees per second.
    pub rotation_speed: f32,
    pub elapsed: f64,
    pub year: Option<i32>,
}

impl Default for ClimateVisualState {
    fn default() -> Self {
        Self::baseline(Palette::default())
    }
}

impl ClimateVisualState {
    pub const MAX_SUN_INTENSITY: f32 = 4.0;
    pub const MAX_CITY_LIGHT_INTENSITY: f32 = 4.0;
    pub const MAX_POLAR_BRIGHTNESS: f32 = 2.0;
    pub const MAX_TEMPERATURE_CHANGE: f32 = 6.0;
    pub const MAX_SCATTERING: f32 = 16.0;

    /// Present-day appearance with the given baseline colours.
    pub fn baseline(palette: Palette) -> Self {
        Self {
            palette,

            sun_position: [3.0, 2.0, 3.0],
            sun_intensity: 1.8,
            sun_color: palette.sun,
            ambient_color: palette.ambient,

            atmosphere_radius: 1.35,
            atmosphere_density: 0.3,
            atmosphere_baseline: 0.3,
            ozone_intensity: 0.15,
            scattering: [0.58, 1.35, 3.31],

            wave_strength: 0.08,
            wave_speed: 2.0,
            ocean_specular: 0.9,
            fresnel_strength: 0.8,
            ocean_color: palette.ocean,

            cloud_height: 0.05,
            cloud_density: 0.6,
            cloud_speed: 0.5,
            cloud_offset: [0.0, 0.0],
            cloud_shadowing: 0.3,

            ice_cap_intensity: 0.8,
            ice_color: palette.ice,
            polar_brightness: 1.2,

            city_light_intensity: 2.0,
            city_light_color: palette.city_lights,
            night_visibility: 0.1,

            texture_blend: 1.0,
            climate_influence: 0.3,

            axial_tilt: 23.5,
            seasonal_tilt: 23.5,
            seasonal_variation: 0.0,

            climate_intensity: 1.0,
            vegetation_density: 0.85,
            desertification: 0.0,
            temperature_change: 0.0,
            ice_cap_reduction: 0.0,
            forest_loss: 0.0,
            ocean_acidification: 0.0,
            pollution_level: 0.0,

            rotation_angle: 0.0,
            rotation_speed: 8.0,
            elapsed: 0.0,
            year: None,
        }
    }

    /// Elapsed time as the shader sees it, wrapped every six hours to keep
    /// f32 precision in the wave and cloud animation.
    pub fn shader_time(&self) -> f32 {
        (self.elapsed % 21_600.0) as f32
    }

    /// Pull every parameter back into its valid range.
    pub fn clamp_ranges(&mut self) {
        for value in [
            &mut self.atmosphere_density,
            &mut self.atmosphere_baseline,
            &mut self.ozone_intensity,
            &mut self.wave_strength,
            &mut self.ocean_specular,
            &mut self.fresnel_strength,
            &mut self.cloud_density,
            &mut self.cloud_shadowing,
            &mut self.ice_cap_intensity,
            &mut self.night_visibility,
            &mut self.texture_blend,
            &mut self.climate_influence,
            &mut self.climate_intensity,
            &mut self.vegetation_density,
            &mut self.desertification,
            &mut self.ice_cap_reduction,
            &mut self.forest_loss,
            &mut self.ocean_acidification,
            &mut self.pollution_level,
        ] {
            *value = unit(*value);
        }

        self.sun_intensity = bounded(self.sun_intensity, Self::MAX_SUN_INTENSITY);
        self.city_light_intensity =
            bounded(self.city_light_intensity, Self::MAX_CITY_LIGHT_INTENSITY);
        self.polar_brightness = bounded(self.polar_brightness, Self::MAX_POLAR_BRIGHTNESS);
        self.temperature_change = bounded(self.temperature_change, Self::MAX_TEMPERATURE_CHANGE);
        self.seasonal_variation = finite_or(self.seasonal_variation, 0.0).clamp(-1.0, 1.0);

        for color in [
            &mut self.sun_color,
            &mut self.ambient_color,
            &mut self.ocean_color,
            &mut self.ice_color,
            &mut self.city_light_color,
        ] {
            for c in color.iter_mut() {
                *c = finite_or(*c, 0.0).max(0.0);
            }
        }
        for c in self.scattering.iter_mut() {
            *c = bounded(*c, Self::MAX_SCATTERING);
        }

        self.rotation_angle = wrap(self.rotation_angle, 360.0);
        for offset in self.cloud_offset.iter_mut() {
            *offset = wrap(*offset, 1.0);
        }
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

fn unit(value: f32) -> f32 {
    finite_or(value, 0.0).clamp(0.0, 1.0)
}

fn bounded(value: f32, max: f32) -> f32 {
    finite_or(value, 0.0).clamp(0.0, max)
}

/// Wrap into `[0, period)`. `rem_euclid` can round up to `period` itself
/// for tiny negative inputs, so fold that back to zero.
pub(crate) fn wrap(value: f32, period: f32) -> f32 {
    let wrapped = finite_or(value, 0.0).rem_euclid(period);
    if wrapped >= period {
        0.0
    } else {
        wrapped
    }
}

/// Component-wise `a + (b - a) * t`.
pub(crate) fn lerp3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_present_day() {
        let state = ClimateVisualState::default();
        assert_eq!(state.sun_intensity, 1.8);
        assert_eq!(state.atmosphere_density, 0.3);
        assert_eq!(state.wave_strength, 0.08);
        assert_eq!(state.cloud_density, 0.6);
        assert_eq!(state.texture_blend, 1.0);
        assert_eq!(state.climate_influence, 0.3);
        assert_eq!(state.axial_tilt, 23.5);
        assert_eq!(state.vegetation_density, 0.85);
        assert_eq!(state.ocean_color, [0.1, 0.3, 0.6]);
        assert!(state.year.is_none());
    }

    #[test]
    fn palette_from_default_config_is_close_to_builtin() {
        let palette = Palette::from_config(&PaletteConfig::default());
        let builtin = Palette::default();
        for (a, b) in palette.ocean.iter().zip(builtin.ocean) {
            assert!((a - b).abs() < 0.01);
        }
    }

    #[test]
    fn palette_bad_hex_falls_back() {
        let config = PaletteConfig {
            ice: "not-a-colour".into(),
            ..Default::default()
        };
        let palette = Palette::from_config(&config);
        assert_eq!(palette.ice, Palette::default().ice);
    }

    #[test]
    fn clamp_ranges_pulls_values_back() {
        let mut state = ClimateVisualState {
            cloud_density: 1.7,
            vegetation_density: -0.2,
            sun_intensity: 9.0,
            temperature_change: f32::NAN,
            scattering: [20.0, 1.0, -1.0],
            ocean_color: [-0.5, f32::INFINITY, 0.4],
            rotation_angle: -30.0,
            cloud_offset: [1.25, -0.25],
            ..Default::default()
        };
        state.clamp_ranges();
        assert_eq!(state.cloud_density, 1.0);
        assert_eq!(state.vegetation_density, 0.0);
        assert_eq!(state.sun_intensity, 4.0);
        assert_eq!(state.temperature_change, 0.0);
        assert_eq!(state.scattering, [16.0, 1.0, 0.0]);
        assert_eq!(state.ocean_color, [0.0, 0.0, 0.4]);
        assert!((state.rotation_angle - 330.0).abs() < 1e-4);
        assert!((state.cloud_offset[0] - 0.25).abs() < 1e-6);
        assert!((state.cloud_offset[1] - 0.75).abs() < 1e-6);
    }

    #[test]
    fn wrap_never_returns_period() {
        assert_eq!(wrap(-1e-9, 1.0), 0.0);
        assert_eq!(wrap(360.0, 360.0), 0.0);
        assert!(wrap(-1e-9, 360.0) < 360.0);
    }

    #[test]
    fn shader_time_wraps() {
        let state = ClimateVisualState {
            elapsed: 21_600.5,
            ..Default::default()
        };
        assert!((state.shader_time() - 0.5).abs() < 1e-3);
    }
}
