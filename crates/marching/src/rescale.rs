//! Rescale phase: build the bounded canvas from the source image.

use contour_common::MarchingConfig;
use raster::{sample_bicubic, Image, CHANNELS};
use serde::Serialize;
use tracing::trace;

use crate::partition::RowBand;

/// How the canvas is produced from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleMode {
    /// Source fits the canvas bounds; bytes are copied unchanged.
    Copy,
    /// Source exceeds a bound; every canvas pixel is a bicubic sample.
    Bicubic,
}

impl ResampleMode {
    pub fn select(config: &MarchingConfig, source: &Image) -> Self {
        if config.fits_canvas(source.width(), source.height()) {
            Self::Copy
        } else {
            Self::Bicubic
        }
    }
}

/// Fill one band of canvas rows.
///
/// `canvas_width` and `canvas_height` are the full canvas dimensions; the
/// band holds rows `band.rows` of that canvas.
pub fn rescale_band(
    source: &Image,
    mut band: RowBand<'_, u8>,
    canvas_width: usize,
    canvas_height: usize,
    mode: ResampleMode,
) {
    trace!(worker = band.worker, rows = ?band.rows, ?mode, "Rescale band");

    // Canvas pixel (row, col) lives at `row * width + col` here, in the
    // sampler and in the tile stamper alike.
    match mode {
        ResampleMode::Copy => {
            // Canvas and source share dimensions, so rows line up byte for byte.
            let stride = source.stride();
            let start = band.rows.start * stride;
            let end = band.rows.end * stride;
            band.data.copy_from_slice(&source.data()[start..end]);
        }
        ResampleMode::Bicubic => {
            let u_span = canvas_width.saturating_sub(1).max(1) as f32;
            let v_span = canvas_height.saturating_sub(1).max(1) as f32;

            for row in band.rows.clone() {
                let v = row as f32 / v_span;
                let dst = band.row_mut(row);
                for (col, pixel) in dst.chunks_exact_mut(CHANNELS).enumerate() {
                    let u = col as f32 / u_span;
                    pixel.copy_from_slice(&sample_bicubic(source, u, v));
                }
            }
        }
    }
}
