//! Baseline colors of the globe, as hex strings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub ocean: String,
    pub ice: String,
    pub city_lights: String,
    pub sun: String,
    pub ambient: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            ocean: "#1a4d99".into(),
            ice: "#e6f2ff".into(),
            city_lights: "#ffcc66".into(),
            sun: "#fff2cc".into(),
            ambient: "#1a264d".into(),
        }
    }
}
