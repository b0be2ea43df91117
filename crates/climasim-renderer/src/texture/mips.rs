//! CPU mip chain generation.

use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Number of levels in a full chain down to 1×1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Full mip chain, level 0 first. Each level halves both dimensions
/// (never below 1) with a triangle filter.
pub fn mip_chain(base: RgbaImage) -> Vec<RgbaImage> {
    let levels = mip_level_count(base.width(), base.height()) as usize;
    let mut chain = Vec::with_capacity(levels);
    chain.push(base);

    while chain.len() < levels {
        let Some(prev) = chain.last() else { break };
        let width = (prev.width() / 2).max(1);
        let height = (prev.height() / 2).max(1);
        let next = imageops::resize(prev, width, height, FilterType::Triangle);
        chain.push(next);
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_counts() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(2, 2), 2);
        assert_eq!(mip_level_count(512, 512), 10);
        assert_eq!(mip_level_count(1024, 512), 11);
        assert_eq!(mip_level_count(300, 7), 9);
    }

    #[test]
    fn chain_halves_to_one() {
        let chain = mip_chain(RgbaImage::from_pixel(16, 4, image::Rgba([10, 20, 30, 255])));
        let sizes: Vec<(u32, u32)> = chain.iter().map(|l| l.dimensions()).collect();
        assert_eq!(sizes, vec![(16, 4), (8, 2), (4, 1), (2, 1), (1, 1)]);
    }

    #[test]
    fn flat_colour_survives_filtering() {
        let chain = mip_chain(RgbaImage::from_pixel(8, 8, image::Rgba([10, 20, 30, 255])));
        let last = chain.last().unwrap().get_pixel(0, 0).0;
        for (got, want) in last.iter().zip([10u8, 20, 30, 255]) {
            assert!(got.abs_diff(want) <= 1, "{last:?}");
        }
    }
}
