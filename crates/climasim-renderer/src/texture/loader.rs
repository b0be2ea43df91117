//! Decode-or-synthesize entry point and asset write-back.

use std::path::Path;

use image::{DynamicImage, ImageError};
use tracing::{debug, info, warn};

use super::synth::{SynthOptions, Synthesizer};
use super::types::{TextureError, TextureMap, TextureOrigin, TextureRole};

/// Decode an image file, keeping its channel layout where it is 8-bit
/// luminance, RGB, or RGBA. Other formats are converted to the nearest of
/// those three.
pub fn decode(path: &Path, role: TextureRole) -> Result<TextureMap, TextureError> {
    let image = image::open(path).map_err(|e| match e {
        ImageError::IoError(source) => TextureError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => TextureError::Decode {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    })?;

    let (width, height) = (image.width(), image.height());
    let (channels, data) = match image {
        DynamicImage::ImageLuma8(img) => (1, img.into_raw()),
        DynamicImage::ImageRgb8(img) => (3, img.into_raw()),
        DynamicImage::ImageRgba8(img) => (4, img.into_raw()),
        other => {
            let color = other.color();
            if color.has_alpha() {
                (4, other.to_rgba8().into_raw())
            } else if color.has_color() {
                (3, other.to_rgb8().into_raw())
            } else {
                (1, other.to_luma8().into_raw())
            }
        }
    };

    TextureMap::new(
        role,
        width,
        height,
        channels,
        data,
        TextureOrigin::Decoded(path.to_path_buf()),
    )
}

/// Encode a raster to `path`; the format follows the file extension.
///
/// JPEG has no alpha channel, so RGBA rasters lose alpha there.
pub fn write_image(map: &TextureMap, path: &Path) -> Result<(), TextureError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| TextureError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let is_jpeg = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false);

    let rgba = DynamicImage::ImageRgba8(map.to_rgba8());
    let image = match map.channels() {
        1 => DynamicImage::ImageLuma8(rgba.to_luma8()),
        3 => DynamicImage::ImageRgb8(rgba.to_rgb8()),
        _ if is_jpeg => DynamicImage::ImageRgb8(rgba.to_rgb8()),
        _ => rgba,
    };

    image.save(path).map_err(|e| TextureError::Encode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Decodes role textures and falls back to seeded synthesis on any failure.
pub struct TextureProvider {
    synth: Synthesizer,
    write_back: bool,
}

impl TextureProvider {
    pub fn new(options: &SynthOptions) -> Self {
        Self {
            synth: Synthesizer::new(options.seed, options.resolution),
            write_back: options.write_back,
        }
    }

    /// Decode `path` for `role`, or synthesize when the path is absent or
    /// unreadable. Never fails.
    pub fn load_or_synthesize(&self, path: Option<&Path>, role: TextureRole) -> TextureMap {
        let Some(path) = path else {
            debug!(role = %role, "no asset configured, synthesizing");
            return self.synth.synthesize(role);
        };

        match decode(path, role) {
            Ok(map) => {
                info!(
                    role = %role,
                    "loaded {} ({}x{}, {} channels)",
                    path.display(),
                    map.width(),
                    map.height(),
                    map.channels()
                );
                map
            }
            Err(e) => {
                warn!(role = %role, "{e}; using procedural fallback");
                let map = self.synth.synthesize(role);
                let missing = matches!(
                    &e,
                    TextureError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
                );
                if self.write_back && missing {
                    match write_image(&map, path) {
                        Ok(()) => info!("wrote synthesized {role} texture to {}", path.display()),
                        Err(e) => warn!("texture write-back failed: {e}"),
                    }
                }
                map
            }
        }
    }
}

/// One-shot decode-or-synthesize without sharing a land mask across roles.
pub fn load_or_synthesize(
    path: Option<&Path>,
    role: TextureRole,
    options: &SynthOptions,
) -> TextureMap {
    TextureProvider::new(options).load_or_synthesize(path, role)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn options(write_back: bool) -> SynthOptions {
        SynthOptions {
            seed: 17,
            resolution: Some(16),
            write_back,
        }
    }

    #[test]
    fn missing_path_synthesizes() {
        let map = load_or_synthesize(None, TextureRole::Day, &options(false));
        assert!(map.is_synthesized());
        assert_eq!(map.width(), 16);
    }

    #[test]
    fn unreadable_path_synthesizes() {
        let map = load_or_synthesize(
            Some(Path::new("/nonexistent/climasim/earth_day.jpg")),
            TextureRole::Day,
            &options(false),
        );
        assert_eq!(map.origin(), &TextureOrigin::Synthesized { seed: 17 });
    }

    #[test]
    fn corrupt_file_synthesizes_and_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("earth_night.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let map = load_or_synthesize(Some(&path), TextureRole::Night, &options(true));
        assert!(map.is_synthesized());
        assert_eq!(std::fs::read(&path).unwrap(), b"definitely not a png");
    }

    #[test]
    fn decode_keeps_luminance_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spec.png");
        image::GrayImage::from_pixel(4, 2, image::Luma([99]))
            .save(&path)
            .unwrap();

        let map = decode(&path, TextureRole::Specular).unwrap();
        assert_eq!(map.channels(), 1);
        assert_eq!((map.width(), map.height()), (4, 2));
        assert!(map.data().iter().all(|&b| b == 99));
        assert_eq!(map.origin(), &TextureOrigin::Decoded(path));
    }

    #[test]
    fn decode_keeps_alpha_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clouds.png");
        image::RgbaImage::from_pixel(3, 3, image::Rgba([1, 2, 3, 4]))
            .save(&path)
            .unwrap();

        let map = decode(&path, TextureRole::Clouds).unwrap();
        assert_eq!(map.channels(), 4);
        assert_eq!(map.texel(2, 2), &[1, 2, 3, 4]);
    }

    #[test]
    fn write_back_creates_asset_then_decodes_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("textures").join("earth_clouds.png");

        let provider = TextureProvider::new(&options(true));
        let first = provider.load_or_synthesize(Some(&path), TextureRole::Clouds);
        assert!(first.is_synthesized());
        assert!(path.exists());

        let second = provider.load_or_synthesize(Some(&path), TextureRole::Clouds);
        assert!(!second.is_synthesized());
        assert_eq!(second.channels(), 4);
        assert_eq!(second.data(), first.data());
    }

    #[test]
    fn write_back_disabled_leaves_disk_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("earth_day.png");
        let _ = load_or_synthesize(Some(&path), TextureRole::Day, &options(false));
        assert!(!path.exists());
    }

    #[test]
    fn jpeg_write_drops_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clouds.jpg");
        let map = super::super::synth::synthesize(TextureRole::Clouds, 1, Some(16));
        write_image(&map, &path).unwrap();
        let decoded = decode(&path, TextureRole::Clouds).unwrap();
        assert_eq!(decoded.channels(), 3);
    }
}
