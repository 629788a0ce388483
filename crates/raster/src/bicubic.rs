//! Bicubic sampling of RGB images.

use crate::bitmap::{Image, CHANNELS};

/// Sample an image at normalized coordinates.
///
/// `u` runs left to right and `v` top to bottom, both over `[0, 1]`; values
/// outside that range are clamped. Uses a Catmull-Rom spline over the 4x4
/// neighbourhood with edge clamping, per channel.
pub fn sample_bicubic(image: &Image, u: f32, v: f32) -> [u8; 3] {
    if image.is_empty() {
        return [0; 3];
    }

    let x = u.clamp(0.0, 1.0) * (image.width() - 1) as f32;
    let y = v.clamp(0.0, 1.0) * (image.height() - 1) as f32;

    let xi = x.floor() as isize;
    let yi = y.floor() as isize;
    let xf = x - xi as f32;
    let yf = y - yi as f32;

    let max_col = image.width() as isize - 1;
    let max_row = image.height() as isize - 1;

    // Sample 4x4 grid of points
    let mut values = [[[0.0f32; CHANNELS]; 4]; 4];
    for (j, row_values) in values.iter_mut().enumerate() {
        let py = (yi + j as isize - 1).clamp(0, max_row) as usize;
        for (i, value) in row_values.iter_mut().enumerate() {
            let px = (xi + i as isize - 1).clamp(0, max_col) as usize;
            let rgb = image.pixel(py, px);
            for ch in 0..CHANNELS {
                value[ch] = rgb[ch] as f32;
            }
        }
    }

    let mut sample = [0u8; 3];
    for ch in 0..CHANNELS {
        // Cubic interpolation along x for each row, then along y
        let mut row_values = [0.0f32; 4];
        for (j, row) in values.iter().enumerate() {
            row_values[j] = cubic_1d(row[0][ch], row[1][ch], row[2][ch], row[3][ch], xf);
        }
        let value = cubic_1d(row_values[0], row_values[1], row_values[2], row_values[3], yf);
        sample[ch] = value.round().clamp(0.0, 255.0) as u8;
    }

    sample
}

/// 1D cubic interpolation using Catmull-Rom spline.
fn cubic_1d(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;

    let a = -0.5 * p0 + 1.5 * p1 - 1.5 * p2 + 0.5 * p3;
    let b = p0 - 2.5 * p1 + 2.0 * p2 - 0.5 * p3;
    let c = -0.5 * p0 + 0.5 * p2;
    let d = p1;

    a * t3 + b * t2 + c * t + d
}
