//! The seven textures a globe binds, in texture-unit order.

use std::path::{Path, PathBuf};

use climasim_config::TexturePaths;

use crate::device::{GraphicsDevice, TextureHandle, TextureUpload};

use super::loader::TextureProvider;
use super::mips::mip_chain;
use super::synth::SynthOptions;
use super::types::TextureRole;

/// Optional asset path per role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureSources {
    paths: [Option<PathBuf>; 7],
}

impl TextureSources {
    /// No assets: every role is synthesized.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_paths(paths: &TexturePaths) -> Self {
        Self {
            paths: [
                paths.day.clone(),
                paths.night.clone(),
                paths.clouds.clone(),
                paths.normal.clone(),
                paths.specular.clone(),
                paths.bathymetry.clone(),
                paths.vegetation.clone(),
            ],
        }
    }

    pub fn with(mut self, role: TextureRole, path: impl Into<PathBuf>) -> Self {
        self.paths[role.unit()] = Some(path.into());
        self
    }

    pub fn get(&self, role: TextureRole) -> Option<&Path> {
        self.paths[role.unit()].as_deref()
    }
}

/// Uploaded globe textures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureSet {
    handles: [TextureHandle; 7],
    synthesized: [bool; 7],
}

impl TextureSet {
    /// Acquire every role (decode or synthesize) and upload it with mips.
    pub fn load<D: GraphicsDevice + ?Sized>(
        device: &mut D,
        sources: &TextureSources,
        options: &SynthOptions,
    ) -> Self {
        let provider = TextureProvider::new(options);
        let mut synthesized = [false; 7];
        let handles = TextureRole::ALL.map(|role| {
            let map = provider.load_or_synthesize(sources.get(role), role);
            synthesized[role.unit()] = map.is_synthesized();
            let upload = TextureUpload {
                label: format!("globe {role} texture"),
                levels: mip_chain(map.to_rgba8()),
            };
            device.create_texture(&upload)
        });

        let fallback_count = synthesized.iter().filter(|&&s| s).count();
        tracing::info!("globe textures ready ({fallback_count} of 7 synthesized)");

        Self {
            handles,
            synthesized,
        }
    }

    pub fn handles(&self) -> &[TextureHandle; 7] {
        &self.handles
    }

    pub fn handle(&self, role: TextureRole) -> TextureHandle {
        self.handles[role.unit()]
    }

    pub fn is_synthesized(&self, role: TextureRole) -> bool {
        self.synthesized[role.unit()]
    }

    pub fn release<D: GraphicsDevice + ?Sized>(&self, device: &mut D) {
        for handle in self.handles {
            device.release_texture(handle);
        }
    }
}
