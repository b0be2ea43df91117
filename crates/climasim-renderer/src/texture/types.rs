//! Texture roles, rasters, and errors.

use std::fmt;
use std::path::PathBuf;

/// What a texture is used for. The discriminant is its texture unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureRole {
    Day = 0,
    Night = 1,
    Clouds = 2,
    Normal = 3,
    Specular = 4,
    Bathymetry = 5,
    Vegetation = 6,
}

impl TextureRole {
    /// All roles in texture-unit order.
    pub const ALL: [TextureRole; 7] = [
        TextureRole::Day,
        TextureRole::Night,
        TextureRole::Clouds,
        TextureRole::Normal,
        TextureRole::Specular,
        TextureRole::Bathymetry,
        TextureRole::Vegetation,
    ];

    pub fn unit(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            TextureRole::Day => "day",
            TextureRole::Night => "night",
            TextureRole::Clouds => "clouds",
            TextureRole::Normal => "normal",
            TextureRole::Specular => "specular",
            TextureRole::Bathymetry => "bathymetry",
            TextureRole::Vegetation => "vegetation",
        }
    }

    /// Edge length of a synthesized raster when no override is configured.
    pub fn default_size(self) -> u32 {
        match self {
            TextureRole::Day => 1024,
            _ => 512,
        }
    }

    /// Channel count of a synthesized raster.
    pub fn synth_channels(self) -> u8 {
        match self {
            TextureRole::Clouds => 4,
            _ => 3,
        }
    }
}

impl fmt::Display for TextureRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a raster came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureOrigin {
    Decoded(PathBuf),
    Synthesized { seed: u64 },
}

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("unsupported channel count: {0}")]
    UnsupportedChannels(u8),

    #[error("raster is {actual} bytes, expected {expected}")]
    Dimensions { expected: usize, actual: usize },

    #[error("failed to encode {path}: {message}")]
    Encode { path: PathBuf, message: String },
}

/// A decoded or synthesized 8-bit raster.
#[derive(Debug, Clone)]
pub struct TextureMap {
    role: TextureRole,
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
    origin: TextureOrigin,
}

impl TextureMap {
    /// Wrap raw bytes. `data.len()` must be `width * height * channels`.
    pub fn new(
        role: TextureRole,
        width: u32,
        height: u32,
        channels: u8,
        data: Vec<u8>,
        origin: TextureOrigin,
    ) -> Result<Self, TextureError> {
        if !matches!(channels, 1 | 3 | 4) {
            return Err(TextureError::UnsupportedChannels(channels));
        }
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected || expected == 0 {
            return Err(TextureError::Dimensions {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            role,
            width,
            height,
            channels,
            data,
            origin,
        })
    }

    /// Trusted constructor for rasters built in this crate.
    pub(crate) fn from_raw_parts(
        role: TextureRole,
        width: u32,
        height: u32,
        channels: u8,
        data: Vec<u8>,
        origin: TextureOrigin,
    ) -> Self {
        debug_assert_eq!(
            data.len(),
            width as usize * height as usize * channels as usize
        );
        Self {
            role,
            width,
            height,
            channels,
            data,
            origin,
        }
    }

    pub fn role(&self) -> TextureRole {
        self.role
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn origin(&self) -> &TextureOrigin {
        &self.origin
    }

    pub fn is_synthesized(&self) -> bool {
        matches!(self.origin, TextureOrigin::Synthesized { .. })
    }

    /// Channel bytes of the texel at `(x, y)`.
    pub fn texel(&self, x: u32, y: u32) -> &[u8] {
        let c = self.channels as usize;
        let start = (y as usize * self.width as usize + x as usize) * c;
        &self.data[start..start + c]
    }

    /// Expand to RGBA8. Luminance is replicated, missing alpha is opaque.
    pub fn to_rgba8(&self) -> image::RgbaImage {
        let mut out = image::RgbaImage::new(self.width, self.height);
        let c = self.channels as usize;
        for (texel, pixel) in self.data.chunks_exact(c).zip(out.pixels_mut()) {
            pixel.0 = match c {
                1 => [texel[0], texel[0], texel[0], 255],
                3 => [texel[0], texel[1], texel[2], 255],
                _ => [texel[0], texel[1], texel[2], texel[3]],
            };
        }
        out
    }
}

// =============================================================================
// Tests
// =============================================================================
