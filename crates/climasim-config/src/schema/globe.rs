//! Globe geometry and animation settings.

use serde::{Deserialize, Serialize};

/// Sphere tessellation preset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MeshDetail {
    Low,
    #[default]
    Medium,
    High,
    Ultra,
}

impl MeshDetail {
    /// `(rings, sectors)` for this preset.
    pub fn resolution(self) -> (u32, u32) {
        match self {
            MeshDetail::Low => (32, 64),
            MeshDetail::Medium => (64, 128),
            MeshDetail::High => (128, 256),
            MeshDetail::Ultra => (200, 400),
        }
    }
}

/// Globe mesh and motion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub detail: MeshDetail,
    pub radius: f64,
    pub atmosphere_radius: f64,
    pub atmosphere_detail: MeshDetail,
    /// Draw the translucent atmosphere shell after the surface.
    pub atmosphere_pass: bool,
    /// Spin rate in degrees per second.
    pub rotation_speed: f64,
    /// Brightness multiplier used until the first user input.
    pub welcome_brightness: f64,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            detail: MeshDetail::Ultra,
            radius: 1.2,
            atmosphere_radius: 1.35,
            atmosphere_detail: MeshDetail::Medium,
            atmosphere_pass: true,
            rotation_speed: 8.0,
            welcome_brightness: 0.7,
        }
    }
}
