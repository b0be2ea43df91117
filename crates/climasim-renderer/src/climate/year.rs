//! Year-driven climate progression.

use tracing::{debug, warn};

use super::state::{lerp3, ClimateVisualState};

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

const OCEAN_TARGET: [f32; 3] = [0.15, 0.4, 0.5];

/// Atmosphere baseline in 1900.
pub const YEAR_ATMOSPHERE_START: f32 = 0.25;

/// Fraction of the way from 1900 to 2100, after clamping the year.
pub fn year_progress(year: i32) -> f32 {
    (year.clamp(MIN_YEAR, MAX_YEAR) - MIN_YEAR) as f32 / (MAX_YEAR - MIN_YEAR) as f32
}

impl ClimateVisualState {
    /// Set the climate to its expected state in `year`.
    ///
    /// Every parameter is computed from the baseline, so calling this twice
    /// with the same year is the same as calling it once, and later years
    /// never look healthier than earlier ones.
    pub fn apply_year(&mut self, year: i32) {
        let clamped = year.clamp(MIN_YEAR, MAX_YEAR);
        if clamped != year {
            warn!(year, clamped, "year out of range");
        }
        let p = year_progress(clamped);

        // The year curve starts at the 1900 haze of 0.25, thinner than the
        // present-day default of 0.3, and reaches it around 1967.
        self.atmosphere_baseline = YEAR_ATMOSPHERE_START + 0.15 * p;
        self.sun_intensity = 1.8 + 0.3 * p;
        self.ice_cap_intensity = 0.8 - 0.4 * p;
        self.desertification = 0.3 * p;
        self.vegetation_density = 0.85 - 0.2 * p;
        self.ocean_color = lerp3(self.palette.ocean, OCEAN_TARGET, 0.3 * p);
        self.temperature_change = 3.0 * p;
        self.ice_cap_reduction = 0.6 * p;
        self.forest_loss = 0.3 * p;
        self.ocean_acidification = 0.4 * p;
        self.pollution_level = 0.8 * p;
        self.year = Some(clamped);

        self.refresh_atmosphere();
        self.clamp_ranges();
        debug!(year = clamped, progress = p, "applied climate year");
    }
}

// =============================================================================
// Tests
// =============================================================================
