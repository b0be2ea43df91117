//! Deterministic procedural fallback rasters, one generator per role.

use std::cell::OnceCell;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::geography::{city_density, uv_to_lon_lat, LandMask};
use super::types::{TextureMap, TextureOrigin, TextureRole};

/// Knobs for synthesized fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthOptions {
    pub seed: u64,
    /// Square edge length overriding every role's default size.
    pub resolution: Option<u32>,
    /// Persist synthesized rasters to their asset path.
    pub write_back: bool,
}

impl Default for SynthOptions {
    fn default() -> Self {
        Self {
            seed: 0x00C1_1A5E,
            resolution: None,
            write_back: false,
        }
    }
}

impl SynthOptions {
    pub fn from_config(config: &climasim_config::schema::TextureConfig) -> Self {
        Self {
            seed: config.seed,
            resolution: config.synth_resolution,
            write_back: config.write_back,
        }
    }
}

/// Produces fallback rasters for one seed, sharing a lazily built land mask.
pub struct Synthesizer {
    seed: u64,
    resolution: Option<u32>,
    mask: OnceCell<LandMask>,
}

impl Synthesizer {
    pub fn new(seed: u64, resolution: Option<u32>) -> Self {
        Self {
            seed,
            resolution,
            mask: OnceCell::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn mask(&self) -> &LandMask {
        self.mask.get_or_init(|| LandMask::generate(self.seed))
    }

    /// Independent stream per role so adding a role never shifts another.
    fn rng_for(&self, role: TextureRole) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(role.unit() as u64 + 1);
        rng
    }

    /// Synthesize the raster for `role`. Same seed, role, and size give
    /// byte-identical output.
    pub fn synthesize(&self, role: TextureRole) -> TextureMap {
        let size = self.resolution.unwrap_or(role.default_size()).max(1);
        let channels = role.synth_channels();
        let mut rng = self.rng_for(role);
        let mut data = Vec::with_capacity((size * size) as usize * channels as usize);

        for y in 0..size {
            for x in 0..size {
                let u = (x as f32 + 0.5) / size as f32;
                let v = (y as f32 + 0.5) / size as f32;
                match role {
                    TextureRole::Day => data.extend_from_slice(&self.day_texel(u, v, &mut rng)),
                    TextureRole::Night => {
                        data.extend_from_slice(&self.night_texel(u, v, &mut rng))
                    }
                    TextureRole::Clouds => data.extend_from_slice(&cloud_texel(u, v)),
                    TextureRole::Normal => data.extend_from_slice(&[127, 127, 255]),
                    TextureRole::Specular => {
                        let s = if self.mask().is_land_uv(u, v) { 30 } else { 255 };
                        data.extend_from_slice(&[s, s, s]);
                    }
                    TextureRole::Bathymetry => {
                        let depth = 100 + (rng.gen::<f32>() * 100.0) as u8;
                        data.extend_from_slice(&[depth, depth, 200]);
                    }
                    TextureRole::Vegetation => {
                        let green = 50 + (rng.gen::<f32>() * 150.0) as u8;
                        data.extend_from_slice(&[0, green, 0]);
                    }
                }
            }
        }

        tracing::debug!(role = %role, size, seed = self.seed, "synthesized fallback texture");

        TextureMap::from_raw_parts(
            role,
            size,
            size,
            channels,
            data,
            TextureOrigin::Synthesized { seed: self.seed },
        )
    }

    fn day_texel(&self, u: f32, v: f32, rng: &mut ChaCha8Rng) -> [u8; 3] {
        let (_, lat) = uv_to_lon_lat(u, v);
        let mut jitter = |base: f32, range: f32| (base + rng.gen::<f32>() * range) as u8;

        if !self.mask().is_land_uv(u, v) {
            return [jitter(20.0, 30.0), jitter(50.0, 40.0), jitter(100.0, 80.0)];
        }

        let lat = lat.abs();
        if lat < 36.0 {
            // tropical
            [jitter(50.0, 30.0), jitter(120.0, 50.0), jitter(30.0, 20.0)]
        } else if lat < 63.0 {
            // temperate
            [jitter(80.0, 40.0), jitter(90.0, 40.0), jitter(40.0, 30.0)]
        } else {
            // polar ice and tundra
            [jitter(200.0, 55.0), jitter(200.0, 55.0), jitter(220.0, 35.0)]
        }
    }

    fn night_texel(&self, u: f32, v: f32, rng: &mut ChaCha8Rng) -> [u8; 3] {
        let roll = rng.gen::<f32>();
        if !self.mask().is_land_uv(u, v) {
            return if roll > 0.9995 { [50, 50, 50] } else { [0, 0, 0] };
        }

        let (lon, lat) = uv_to_lon_lat(u, v);
        let light = roll * city_density(lon, lat);
        if light > 0.8 {
            [255, 240, 150]
        } else if light > 0.6 {
            [200, 180, 100]
        } else if light > 0.4 {
            [100, 90, 50]
        } else {
            [0, 0, 0]
        }
    }
}

fn cloud_texel(u: f32, v: f32) -> [u8; 4] {
    let mut c = (u * 10.0).sin() * (v * 8.0).cos() * 0.5;
    c += (u * 20.0).sin() * (v * 15.0).cos() * 0.3;
    c += (u * 40.0).sin() * (v * 30.0).cos() * 0.2;
    let c = ((c + 1.0) * 0.5).clamp(0.0, 1.0);

    let value = (c * 255.0) as u8;
    let alpha = if c > 0.4 {
        ((c - 0.4) / 0.6 * 255.0).min(255.0) as u8
    } else {
        0
    };
    [value, value, value, alpha]
}

/// One-shot synthesis for a single role.
pub fn synthesize(role: TextureRole, seed: u64, resolution: Option<u32>) -> TextureMap {
    Synthesizer::new(seed, resolution).synthesize(role)
}

// =============================================================================
// Tests
// =============================================================================
