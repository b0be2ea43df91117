//! Time-driven oscillators and texture mixing modes.

use tracing::warn;

use super::state::{wrap, ClimateVisualState};

impl ClimateVisualState {
    /// Advance every oscillator by `dt` seconds. Negative or non-finite
    /// steps count as zero.
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() && dt > 0.0 {
            dt
        } else {
            if dt != 0.0 {
                warn!(dt, "ignoring invalid time step");
            }
            0.0
        };

        self.elapsed += dt as f64;
        let t = self.elapsed;

        self.rotation_angle = wrap(self.rotation_angle + self.rotation_speed * dt, 360.0);

        let sun_angle = 0.2 * t;
        self.sun_position = [
            (4.0 * sun_angle.cos()) as f32,
            (2.0 * (sun_angle * 0.5).sin()) as f32,
            (4.0 * sun_angle.sin()) as f32,
        ];

        let drift = self.cloud_speed * dt;
        self.cloud_offset[0] = wrap(self.cloud_offset[0] + drift * 0.01, 1.0);
        self.cloud_offset[1] = wrap(self.cloud_offset[1] + drift * 0.005, 1.0);

        self.seasonal_tilt = self.axial_tilt + (2.0 * (0.1 * t).sin()) as f32;
        self.seasonal_variation = (0.08 * t).sin() as f32;

        self.refresh_atmosphere();
        self.wave_speed = (2.0 + 0.5 * (0.4 * t).sin()) as f32;

        self.clamp_ranges();
    }

    /// Re-centre the density oscillation on the current baseline.
    pub(crate) fn refresh_atmosphere(&mut self) {
        self.atmosphere_density =
            self.atmosphere_baseline + (0.05 * (0.3 * self.elapsed).sin()) as f32;
    }

    /// Weight of the day texture against the procedural colour.
    pub fn set_texture_blend(&mut self, blend: f32) {
        self.texture_blend = blend;
        self.clamp_ranges();
    }

    /// Show the textures as they are: no climate tinting.
    pub fn enable_pure_texture_mode(&mut self) {
        self.texture_blend = 1.0;
        self.climate_influence = 0.0;
    }

    /// Mostly textures, with climate data mixed in.
    pub fn enable_hybrid_mode(&mut self) {
        self.texture_blend = 0.7;
        self.climate_influence = 0.3;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_zero_keeps_time() {
        let mut state = ClimateVisualState::default();
        state.tick(0.0);
        assert_eq!(state.elapsed, 0.0);
        assert_eq!(state.rotation_angle, 0.0);
        assert_eq!(state.sun_position, [4.0, 0.0, 0.0]);
    }

    #[test]
    fn tick_rejects_bad_steps() {
        let mut state = ClimateVisualState::default();
        state.tick(-1.0);
        state.tick(f32::NAN);
        state.tick(f32::INFINITY);
        assert_eq!(state.elapsed, 0.0);
    }

    #[test]
    fn rotation_wraps() {
        let mut state = ClimateVisualState::default();
        state.rotation_speed = 100.0;
        for _ in 0..10 {
            state.tick(1.0);
        }
        assert!((state.rotation_angle - 280.0).abs() < 1e-3);
        assert!((0.0..360.0).contains(&state.rotation_angle));
    }

    #[test]
    fn sun_follows_orbit() {
        let mut state = ClimateVisualState::default();
        state.tick(5.0);
        let a = 1.0f32;
        assert!((state.sun_position[0] - 4.0 * a.cos()).abs() < 1e-4);
        assert!((state.sun_position[1] - 2.0 * (a / 2.0).sin()).abs() < 1e-4);
        assert!((state.sun_position[2] - 4.0 * a.sin()).abs() < 1e-4);
    }

    #[test]
    fn clouds_drift_and_wrap() {
        let mut state = ClimateVisualState::default();
        state.cloud_speed = 50.0;
        state.tick(3.0);
        assert!((state.cloud_offset[0] - 0.5).abs() < 1e-4);
        assert!((state.cloud_offset[1] - 0.75).abs() < 1e-4);
        state.tick(2.0);
        assert!(state.cloud_offset[0] < 1.0);
        assert!(state.cloud_offset[0] >= 0.0);
    }

    #[test]
    fn atmosphere_oscillates_around_baseline() {
        let mut state = ClimateVisualState::default();
        state.atmosphere_baseline = 0.5;
        for _ in 0..200 {
            state.tick(0.1);
            assert!((state.atmosphere_density - 0.5).abs() <= 0.05 + 1e-6);
        }
        assert_eq!(state.atmosphere_baseline, 0.5);
    }

    #[test]
    fn seasonal_tilt_stays_near_axial_tilt() {
        let mut state = ClimateVisualState::default();
        for _ in 0..100 {
            state.tick(0.5);
            assert!((state.seasonal_tilt - 23.5).abs() <= 2.0 + 1e-4);
            assert!(state.seasonal_variation.abs() <= 1.0);
            assert!((state.wave_speed - 2.0).abs() <= 0.5 + 1e-6);
        }
    }

    #[test]
    fn texture_modes() {
        let mut state = ClimateVisualState::default();
        state.enable_hybrid_mode();
        assert_eq!((state.texture_blend, state.climate_influence), (0.7, 0.3));
        state.enable_pure_texture_mode();
        assert_eq!((state.texture_blend, state.climate_influence), (1.0, 0.0));
        state.set_texture_blend(1.5);
        assert_eq!(state.texture_blend, 1.0);
    }
}
