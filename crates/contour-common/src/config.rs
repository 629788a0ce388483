//! Pipeline configuration.

use crate::error::{ContourError, ContourResult};
use serde::Serialize;

/// Tunables shared by every pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarchingConfig {
    /// Grid cell edge in canvas pixels; also the contour tile edge.
    pub step: usize,

    /// Luminance cutoff. Cells brighter than this are background.
    pub sigma: u8,

    /// Canvas width bound; wider sources are resampled.
    pub max_canvas_width: usize,

    /// Canvas height bound; taller sources are resampled.
    pub max_canvas_height: usize,
}

impl Default for MarchingConfig {
    fn default() -> Self {
        Self {
            step: 8,
            sigma: 200,
            max_canvas_width: 2048,
            max_canvas_height: 2048,
        }
    }
}

impl MarchingConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> ContourResult<()> {
        if self.step == 0 {
            return Err(ContourError::invalid_config("step must be > 0"));
        }

        if self.max_canvas_width == 0 || self.max_canvas_height == 0 {
            return Err(ContourError::invalid_config(
                "canvas bounds must be > 0",
            ));
        }

        Ok(())
    }

    /// Canvas dimensions for a source of the given size.
    pub fn canvas_dims(&self, source_width: usize, source_height: usize) -> (usize, usize) {
        (
            source_width.min(self.max_canvas_width),
            source_height.min(self.max_canvas_height),
        )
    }

    /// Whether a source of the given size fits the canvas without resampling.
    pub fn fits_canvas(&self, source_width: usize, source_height: usize) -> bool {
        source_width <= self.max_canvas_width && source_height <= self.max_canvas_height
    }
}
