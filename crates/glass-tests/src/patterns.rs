//! Test pattern generation

use image::{DynamicImage, RgbImage};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Test pattern types
#[derive(Debug, Clone, Copy)]
pub enum TestPattern {
    /// Horizontal gradient black to white
    GradientH,
    /// RGB color cube corners (8 colors)
    ColorCube,
    /// Hue ramp at full saturation
    HueRamp,
    /// Skin tone samples
    SkinTones,
    /// Random pixels with seed
    Random(u64),
    /// Every pixel encodes its own position, so rotations can be traced
    Coordinates,
}

impl TestPattern {
    /// Patterns used for color conversion comparisons
    pub const COLOR: [TestPattern; 5] = [
        Self::GradientH,
        Self::ColorCube,
        Self::HueRamp,
        Self::SkinTones,
        Self::Random(42),
    ];
}

/// Generate a pattern as an interleaved RGB8 buffer
pub fn generate_pattern(pattern: TestPattern, width: usize, height: usize) -> Vec<u8> {
    let pixel_count = width * height;
    let mut data = vec![0u8; pixel_count * 3];

    match pattern {
        TestPattern::GradientH => {
            for (i, chunk) in data.chunks_exact_mut(3).enumerate() {
                let x = i % width;
                chunk.fill(((x as f32 / width as f32) * 255.0) as u8);
            }
        }
        TestPattern::ColorCube => {
            let corners: [[u8; 3]; 8] = [
                [0, 0, 0],
                [255, 0, 0],
                [0, 255, 0],
                [0, 0, 255],
                [255, 255, 0],
                [255, 0, 255],
                [0, 255, 255],
                [255, 255, 255],
            ];
            for (i, chunk) in data.chunks_exact_mut(3).enumerate() {
                chunk.copy_from_slice(&corners[i % 8]);
            }
        }
        TestPattern::HueRamp => {
            for (i, chunk) in data.chunks_exact_mut(3).enumerate() {
                let hue = (i as f32 / pixel_count as f32) * 360.0;
                chunk.copy_from_slice(&hsl_to_rgb(hue, 1.0, 0.5));
            }
        }
        TestPattern::SkinTones => {
            let tones: [[u8; 3]; 6] = [
                [255, 224, 189],
                [241, 194, 125],
                [224, 172, 105],
                [198, 134, 66],
                [141, 85, 36],
                [89, 47, 42],
            ];
            for (i, chunk) in data.chunks_exact_mut(3).enumerate() {
                chunk.copy_from_slice(&tones[i % 6]);
            }
        }
        TestPattern::Random(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            rng.fill_bytes(&mut data);
        }
        TestPattern::Coordinates => {
            for (i, chunk) in data.chunks_exact_mut(3).enumerate() {
                let (x, y) = (i % width, i / width);
                chunk[0] = x as u8;
                chunk[1] = y as u8;
                chunk[2] = 0;
            }
        }
    }

    data
}

/// Generate a pattern as an image
pub fn pattern_image(pattern: TestPattern, width: u32, height: u32) -> DynamicImage {
    let data = generate_pattern(pattern, width as usize, height as usize);
    let buffer = RgbImage::from_raw(width, height, data).expect("pattern buffer has wrong size");
    DynamicImage::ImageRgb8(buffer)
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [u8; 3] {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    [
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    ]
}

/// Standard test sizes
pub mod sizes {
    pub const TINY: (u32, u32) = (8, 8);
    pub const SMALL: (u32, u32) = (64, 64);
    pub const PORTRAIT: (u32, u32) = (24, 40);
}
