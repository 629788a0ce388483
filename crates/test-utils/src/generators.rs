//! Source image generators.
//!
//! These create predictable images whose occupancy grids can be worked out
//! by hand, plus a seeded noise image for determinism checks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use raster::Image;

pub const WHITE: [u8; 3] = [255, 255, 255];
pub const BLACK: [u8; 3] = [0, 0, 0];

/// Solid-colour image.
pub fn solid_image(width: usize, height: usize, rgb: [u8; 3]) -> Image {
    Image::filled(width, height, rgb)
}

/// Black for columns `< split_col`, white from `split_col` on.
///
/// # Example
///
/// ```
/// use test_utils::{vertical_split_image, BLACK, WHITE};
///
/// let img = vertical_split_image(16, 8, 8);
/// assert_eq!(img.pixel(0, 7), BLACK);
/// assert_eq!(img.pixel(0, 8), WHITE);
/// ```
pub fn vertical_split_image(width: usize, height: usize, split_col: usize) -> Image {
    let mut img = Image::filled(width, height, WHITE);
    for row in 0..height {
        for col in 0..split_col.min(width) {
            img.set_pixel(row, col, BLACK);
        }
    }
    img
}

/// Grey ramp running dark (left) to light (right).
pub fn horizontal_gradient_image(width: usize, height: usize) -> Image {
    let mut img = Image::filled(width, height, BLACK);
    let span = width.saturating_sub(1).max(1);
    for row in 0..height {
        for col in 0..width {
            let v = (col * 255 / span) as u8;
            img.set_pixel(row, col, [v, v, v]);
        }
    }
    img
}

/// Dark disc of the given radius centred in a white image.
pub fn disc_image(width: usize, height: usize, radius: f32) -> Image {
    let mut img = Image::filled(width, height, WHITE);
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    for row in 0..height {
        for col in 0..width {
            let dx = col as f32 - cx;
            let dy = row as f32 - cy;
            if (dx * dx + dy * dy).sqrt() <= radius {
                img.set_pixel(row, col, [30, 60, 90]);
            }
        }
    }
    img
}

/// Random pixels from a fixed seed.
pub fn noise_image(width: usize, height: usize, seed: u64) -> Image {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut img = Image::filled(width, height, BLACK);
    for byte in img.data_mut() {
        *byte = rng.gen();
    }
    img
}
