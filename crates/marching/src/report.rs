//! Run summary returned alongside the contour canvas.

use std::time::Duration;

use contour_common::MarchingConfig;
use raster::{Image, CONTOUR_CONFIG_COUNT};
use serde::Serialize;

use crate::coordinator::Phase;
use crate::rescale::ResampleMode;

/// Wall-clock time spent in each phase, barrier wait included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PhaseTimings {
    pub rescale_ms: f64,
    pub sample_ms: f64,
    pub march_ms: f64,
}

impl PhaseTimings {
    pub fn record(&mut self, phase: Phase, elapsed: Duration) {
        let ms = elapsed.as_secs_f64() * 1000.0;
        match phase {
            Phase::Rescale => self.rescale_ms = ms,
            Phase::Sample => self.sample_ms = ms,
            Phase::March => self.march_ms = ms,
            Phase::Done => {}
        }
    }

    pub fn total_ms(&self) -> f64 {
        self.rescale_ms + self.sample_ms + self.march_ms
    }
}

/// What a pipeline run did.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub source_width: usize,
    pub source_height: usize,
    pub canvas_width: usize,
    pub canvas_height: usize,
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub workers: usize,
    pub config: MarchingConfig,
    pub resample: ResampleMode,
    pub timings: PhaseTimings,
    /// Cells marched with each configuration key, indexed by key.
    pub key_histogram: [usize; CONTOUR_CONFIG_COUNT],
}

impl PipelineReport {
    /// Number of distinct tiles that were stamped at least once.
    pub fn distinct_keys(&self) -> usize {
        self.key_histogram.iter().filter(|&&n| n > 0).count()
    }
}

/// Contour canvas plus its run summary.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub canvas: Image,
    pub report: PipelineReport,
}
