//! Fixed worker pool running the three pipeline phases.
//!
//! ## Design
//!
//! - **One pool per coordinator**: exactly `workers` threads are started up
//!   front; no thread is created afterwards.
//! - **One band per worker per phase**: the buffer a phase writes is split
//!   into disjoint `RowBand`s, one per worker ordinal. Reads (the source,
//!   the finished canvas, the finished grid, the tiles) are shared.
//! - **Full barrier between phases**: a phase's bands run inside a pool
//!   scope, and the scope only returns once every band has finished. The
//!   next phase may read anything the previous one wrote.

use std::time::Instant;

use contour_common::{ContourError, ContourResult, MarchingConfig};
use raster::{ContourTileSet, Image};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info};

use crate::engine::march_band;
use crate::grid::OccupancyGrid;
use crate::partition::{grid_partition, march_partition, partition, split_bands};
use crate::report::{PhaseTimings, PipelineOutput, PipelineReport};
use crate::rescale::{rescale_band, ResampleMode};
use crate::sampler::sample_band;

/// Per-worker phase sequence. Every worker walks the same states in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Rescale,
    Sample,
    March,
    Done,
}

impl Phase {
    pub fn next(self) -> Self {
        match self {
            Phase::Rescale => Phase::Sample,
            Phase::Sample => Phase::March,
            Phase::March | Phase::Done => Phase::Done,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Rescale => "rescale",
            Phase::Sample => "sample",
            Phase::March => "march",
            Phase::Done => "done",
        }
    }
}

/// Owns the worker pool and drives a source image through all phases.
pub struct WorkerCoordinator {
    pool: ThreadPool,
    workers: usize,
    config: MarchingConfig,
}

impl WorkerCoordinator {
    /// Start `workers` threads. Failure to start any of them is fatal.
    pub fn new(workers: usize, config: MarchingConfig) -> ContourResult<Self> {
        config.validate()?;
        if workers == 0 {
            return Err(ContourError::invalid_config("thread count must be >= 1"));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|id| format!("contour-worker-{}", id))
            .build()
            .map_err(|e| ContourError::WorkerPool(e.to_string()))?;

        debug!(workers, ?config, "Started worker pool");

        Ok(Self {
            pool,
            workers,
            config,
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run every phase and return the contour canvas.
    pub fn run(&self, source: &Image, tiles: &ContourTileSet) -> ContourResult<PipelineOutput> {
        if tiles.step() != self.config.step {
            return Err(ContourError::invalid_config(format!(
                "tile size {} does not match step {}",
                tiles.step(),
                self.config.step
            )));
        }

        let mode = ResampleMode::select(&self.config, source);
        let mut canvas = self.allocate_canvas(source)?;
        let mut grid = OccupancyGrid::try_new(canvas.width(), canvas.height(), self.config.step)?;

        info!(
            source_width = source.width(),
            source_height = source.height(),
            canvas_width = canvas.width(),
            canvas_height = canvas.height(),
            workers = self.workers,
            ?mode,
            "Extracting contours"
        );

        let mut timings = PhaseTimings::default();
        let mut phase = Phase::Rescale;
        loop {
            let started = Instant::now();
            match phase {
                Phase::Rescale => self.rescale_phase(source, &mut canvas, mode),
                Phase::Sample => self.sample_phase(&canvas, &mut grid),
                Phase::March => self.march_phase(&grid, tiles, &mut canvas),
                Phase::Done => break,
            }
            timings.record(phase, started.elapsed());
            debug!(
                phase = phase.as_str(),
                elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
                "Phase complete"
            );
            phase = phase.next();
        }

        let report = PipelineReport {
            source_width: source.width(),
            source_height: source.height(),
            canvas_width: canvas.width(),
            canvas_height: canvas.height(),
            grid_rows: grid.rows(),
            grid_cols: grid.cols(),
            workers: self.workers,
            config: self.config,
            resample: mode,
            timings,
            key_histogram: grid.key_histogram(),
        };

        info!(
            total_ms = report.timings.total_ms(),
            distinct_keys = report.distinct_keys(),
            "Contours extracted"
        );

        Ok(PipelineOutput { canvas, report })
    }

    /// Run only the rescale phase and return the canvas before sampling.
    pub fn rescale(&self, source: &Image) -> ContourResult<Image> {
        let mode = ResampleMode::select(&self.config, source);
        let mut canvas = self.allocate_canvas(source)?;
        self.rescale_phase(source, &mut canvas, mode);
        Ok(canvas)
    }

    fn allocate_canvas(&self, source: &Image) -> ContourResult<Image> {
        if source.is_empty() {
            return Err(ContourError::DimensionMismatch(format!(
                "source image is empty ({}x{})",
                source.width(),
                source.height()
            )));
        }
        let (width, height) = self.config.canvas_dims(source.width(), source.height());
        Image::try_new(width, height)
    }

    fn rescale_phase(&self, source: &Image, canvas: &mut Image, mode: ResampleMode) {
        let (width, height) = (canvas.width(), canvas.height());
        let stride = canvas.stride();
        let ranges = partition(height, self.workers);
        let bands = split_bands(canvas.data_mut(), stride, &ranges);

        self.pool.scope(|s| {
            for band in bands {
                s.spawn(move |_| rescale_band(source, band, width, height, mode));
            }
        });
    }

    fn sample_phase(&self, canvas: &Image, grid: &mut OccupancyGrid) {
        let cols = grid.cols();
        let ranges = grid_partition(grid.interior_rows(), self.workers);
        let bands = split_bands(grid.cells_mut(), cols, &ranges);
        let config = &self.config;

        self.pool.scope(|s| {
            for band in bands {
                s.spawn(move |_| sample_band(canvas, band, config));
            }
        });
    }

    fn march_phase(&self, grid: &OccupancyGrid, tiles: &ContourTileSet, canvas: &mut Image) {
        let stride = canvas.stride();
        let ranges = march_partition(
            grid.interior_rows(),
            self.config.step,
            canvas.height(),
            self.workers,
        );
        let bands = split_bands(canvas.data_mut(), stride, &ranges);

        self.pool.scope(|s| {
            for band in bands {
                s.spawn(move |_| march_band(grid, tiles, band));
            }
        });
    }
}
