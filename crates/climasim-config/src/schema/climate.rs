//! Climate signal defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateConfig {
    /// Year applied at startup (1900-2100).
    pub start_year: i32,
    /// Intensity used when an issue is applied from the keyboard.
    pub issue_intensity: f64,
    /// Years added or removed per arrow key press.
    pub year_step: u32,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            start_year: 2024,
            issue_intensity: 0.5,
            year_step: 5,
        }
    }
}
