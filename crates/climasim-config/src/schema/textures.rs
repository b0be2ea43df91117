//! Texture asset locations and procedural fallback settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Texture asset configuration.
///
/// File names are resolved against `asset_dir` unless absolute. An empty
/// file name means "always synthesize".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    pub asset_dir: String,
    pub day: String,
    pub night: String,
    pub clouds: String,
    pub normal: String,
    pub specular: String,
    pub bathymetry: String,
    pub vegetation: String,
    /// Seed for every synthesized fallback raster.
    pub seed: u64,
    /// Square edge length for synthesized rasters; role defaults when unset.
    pub synth_resolution: Option<u32>,
    /// Write synthesized rasters to their asset paths for later runs.
    pub write_back: bool,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            asset_dir: "assets/textures".into(),
            day: "earth_day.jpg".into(),
            night: "earth_night.jpg".into(),
            clouds: "earth_clouds.png".into(),
            normal: "earth_normal.jpg".into(),
            specular: "earth_specular.jpg".into(),
            bathymetry: "earth_bathymetry.jpeg".into(),
            vegetation: "earth_vegetation.jpeg".into(),
            seed: 0x00C1_1A5E,
            synth_resolution: None,
            write_back: false,
        }
    }
}

/// Resolved per-role asset paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TexturePaths {
    pub day: Option<PathBuf>,
    pub night: Option<PathBuf>,
    pub clouds: Option<PathBuf>,
    pub normal: Option<PathBuf>,
    pub specular: Option<PathBuf>,
    pub bathymetry: Option<PathBuf>,
    pub vegetation: Option<PathBuf>,
}

impl TextureConfig {
    fn resolve(&self, file: &str) -> Option<PathBuf> {
        let file = file.trim();
        if file.is_empty() {
            return None;
        }
        let path = Path::new(file);
        if path.is_absolute() {
            Some(path.to_path_buf())
        } else {
            Some(Path::new(&self.asset_dir).join(path))
        }
    }

    pub fn resolved_paths(&self) -> TexturePaths {
        TexturePaths {
            day: self.resolve(&self.day),
            night: self.resolve(&self.night),
            clouds: self.resolve(&self.clouds),
            normal: self.resolve(&self.normal),
            specular: self.resolve(&self.specular),
            bathymetry: self.resolve(&self.bathymetry),
            vegetation: self.resolve(&self.vegetation),
        }
    }
}
