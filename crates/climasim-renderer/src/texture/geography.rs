//! Coarse real-world geography used by the procedural fallbacks.
//!
//! Continents and population centres are lat/lon boxes with a land or
//! city probability. The land mask is rolled once per seed on a fixed
//! equirectangular grid so every synthesized role agrees on coastlines.

use std::f32::consts::PI;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// ChaCha stream reserved for the land mask.
const LAND_STREAM: u64 = 0x4C41_4E44;

/// Map texture coordinates to `(longitude, latitude)` in degrees.
///
/// `u = 0.5` is the prime meridian; `v = 0` is the north pole, matching the
/// sphere's `v` running from north to south.
pub fn uv_to_lon_lat(u: f32, v: f32) -> (f32, f32) {
    let lon = (u - 0.5) * 2.0 * PI;
    let lat = (0.5 - v) * PI;
    (lon.to_degrees(), lat.to_degrees())
}

/// Probability that a texel at `(lon, lat)` degrees is land.
pub fn land_probability(lon: f32, lat: f32) -> f32 {
    let lon = wrap_longitude(lon);
    let inside = |lon_min: f32, lon_max: f32, lat_min: f32, lat_max: f32| {
        lon > lon_min && lon < lon_max && lat > lat_min && lat < lat_max
    };

    if inside(-20.0, 50.0, -35.0, 35.0) {
        0.7 // Africa
    } else if inside(-10.0, 180.0, 35.0, 75.0) {
        0.6 // Europe and Asia
    } else if inside(-170.0, -50.0, 25.0, 75.0) {
        0.5 // North America
    } else if inside(-80.0, -35.0, -55.0, 15.0) {
        0.6 // South America
    } else if inside(110.0, 155.0, -45.0, -10.0) {
        0.8 // Australia
    } else {
        0.15 // islands
    }
}

/// Relative city-light density at `(lon, lat)` degrees.
pub fn city_density(lon: f32, lat: f32) -> f32 {
    let lon = wrap_longitude(lon);
    let inside = |lon_min: f32, lon_max: f32, lat_min: f32, lat_max: f32| {
        lon > lon_min && lon < lon_max && lat > lat_min && lat < lat_max
    };

    if inside(-80.0, 40.0, 35.0, 65.0) {
        0.8 // North Atlantic corridor
    } else if inside(100.0, 140.0, 25.0, 45.0) {
        0.9 // East Asia
    } else if inside(70.0, 90.0, 10.0, 35.0) {
        0.7 // India
    } else if inside(-100.0, -65.0, 30.0, 50.0) {
        0.8 // Eastern US
    } else if inside(-10.0, 25.0, 45.0, 60.0) {
        0.8 // Western Europe
    } else if lat.abs() < 60.0 {
        0.3
    } else {
        0.1
    }
}

fn wrap_longitude(lon: f32) -> f32 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Seeded land/ocean classification on an equirectangular grid.
#[derive(Debug, Clone)]
pub struct LandMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl LandMask {
    pub const WIDTH: u32 = 1024;
    pub const HEIGHT: u32 = 512;

    /// Roll the mask for `seed`. Same seed, same mask.
    pub fn generate(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(LAND_STREAM);

        let (width, height) = (Self::WIDTH, Self::HEIGHT);
        let mut cells = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                let u = (x as f32 + 0.5) / width as f32;
                let v = (y as f32 + 0.5) / height as f32;
                let (lon, lat) = uv_to_lon_lat(u, v);
                cells.push(rng.gen::<f32>() < land_probability(lon, lat));
            }
        }

        tracing::debug!(seed, "generated land mask {width}x{height}");
        Self {
            width,
            height,
            cells,
        }
    }

    /// Nearest-cell lookup; `u` wraps, `v` clamps.
    pub fn is_land_uv(&self, u: f32, v: f32) -> bool {
        let x = (u.rem_euclid(1.0) * self.width as f32) as u32;
        let y = (v.clamp(0.0, 1.0) * self.height as f32) as u32;
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        self.cells[(y * self.width + x) as usize]
    }

    /// Share of land cells.
    pub fn land_fraction(&self) -> f32 {
        let land = self.cells.iter().filter(|&&c| c).count();
        land as f32 / self.cells.len() as f32
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uv_centre_is_null_island() {
        let (lon, lat) = uv_to_lon_lat(0.5, 0.5);
        assert!(lon.abs() < 1e-4);
        assert!(lat.abs() < 1e-4);
    }

    #[test]
    fn top_row_is_north() {
        let (_, lat) = uv_to_lon_lat(0.5, 0.0);
        assert!((lat - 90.0).abs() < 1e-3);
        let (_, lat) = uv_to_lon_lat(0.5, 1.0);
        assert!((lat + 90.0).abs() < 1e-3);
    }

    #[test]
    fn continents_are_likelier_land_than_open_ocean() {
        assert_eq!(land_probability(20.0, 0.0), 0.7);
        assert_eq!(land_probability(135.0, -25.0), 0.8);
        assert_eq!(land_probability(-150.0, -30.0), 0.15);
    }

    #[test]
    fn city_density_regions() {
        assert_eq!(city_density(120.0, 35.0), 0.9);
        assert_eq!(city_density(80.0, 20.0), 0.7);
        assert_eq!(city_density(0.0, 50.0), 0.8);
        assert_eq!(city_density(-150.0, 0.0), 0.3);
        assert_eq!(city_density(0.0, -80.0), 0.1);
    }

    #[test]
    fn longitude_wraps() {
        assert_eq!(city_density(120.0 - 360.0, 35.0), 0.9);
    }

    #[test]
    fn mask_is_deterministic_per_seed() {
        let a = LandMask::generate(7);
        let b = LandMask::generate(7);
        assert_eq!(a.cells, b.cells);
        let c = LandMask::generate(8);
        assert_ne!(a.cells, c.cells);
    }

    #[test]
    fn mask_fraction_is_plausible() {
        let mask = LandMask::generate(1);
        let fraction = mask.land_fraction();
        assert!(fraction > 0.15 && fraction < 0.6, "land fraction {fraction}");
    }

    #[test]
    fn mask_lookup_wraps_u() {
        let mask = LandMask::generate(3);
        assert_eq!(mask.is_land_uv(0.25, 0.4), mask.is_land_uv(1.25, 0.4));
        // Clamped v never panics.
        let _ = mask.is_land_uv(0.5, 1.5);
        let _ = mask.is_land_uv(-0.2, -3.0);
    }
}
