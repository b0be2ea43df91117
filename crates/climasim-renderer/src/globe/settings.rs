//! Construction-time globe settings.

use climasim_config::ClimaSimConfig;

use crate::climate::Palette;
use crate::sphere::SphereLod;

/// Geometry and motion a [`Globe`](super::Globe) is built with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobeSettings {
    pub lod: SphereLod,
    pub radius: f32,
    pub atmosphere_lod: SphereLod,
    pub atmosphere_radius: f32,
    pub atmosphere_pass: bool,
    /// Degrees per second.
    pub rotation_speed: f32,
    pub palette: Palette,
}

impl Default for GlobeSettings {
    fn default() -> Self {
        Self {
            lod: SphereLod::ULTRA,
            radius: 1.2,
            atmosphere_lod: SphereLod::MEDIUM,
            atmosphere_radius: 1.35,
            atmosphere_pass: true,
            rotation_speed: 8.0,
            palette: Palette::default(),
        }
    }
}

impl GlobeSettings {
    pub fn from_config(config: &ClimaSimConfig) -> Self {
        let globe = &config.globe;
        Self {
            lod: SphereLod::from_detail(globe.detail),
            radius: globe.radius as f32,
            atmosphere_lod: SphereLod::from_detail(globe.atmosphere_detail),
            atmosphere_radius: globe.atmosphere_radius as f32,
            atmosphere_pass: globe.atmosphere_pass,
            rotation_speed: globe.rotation_speed as f32,
            palette: Palette::from_config(&config.palette),
        }
    }
}

/// Placement of the globe in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobeTransform {
    pub position: [f32; 3],
    /// Degrees about the x axis.
    pub pitch: f32,
    pub scale: f32,
}

impl Default for GlobeTransform {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            pitch: 0.0,
            scale: 1.0,
        }
    }
}
