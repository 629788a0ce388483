//! Parallel marching-squares contour extraction.
//!
//! A source raster is turned into a contour image in three phases, each run
//! by a fixed pool of workers over disjoint row bands:
//!
//! ```text
//! source Image
//!      │
//!      ▼
//! Rescale  ── copy, or bicubic resample down to the canvas bound
//!      │      (barrier)
//!      ▼
//! Sample   ── threshold one pixel per step x step cell into OccupancyGrid
//!      │      (barrier)
//!      ▼
//! March    ── 4-bit corner key per cell, stamp the matching tile
//!      │      (barrier)
//!      ▼
//! canvas Image
//! ```
//!
//! # Example
//!
//! ```ignore
//! use marching::{MarchingConfig, WorkerCoordinator};
//! use raster::{read_ppm, ContourTileSet};
//!
//! let config = MarchingConfig::default();
//! let tiles = ContourTileSet::load("./contours", config.step)?;
//! let source = read_ppm("in.ppm")?;
//!
//! let output = WorkerCoordinator::new(4, config)?.run(&source, &tiles)?;
//! ```

pub mod coordinator;
pub mod engine;
pub mod grid;
pub mod partition;
pub mod report;
pub mod rescale;
pub mod sampler;

pub use contour_common::{ContourError, ContourResult, MarchingConfig};
pub use coordinator::{Phase, WorkerCoordinator};
pub use grid::{OccupancyGrid, BACKGROUND, FOREGROUND};
pub use partition::{partition, row_range, split_bands, RowBand};
pub use report::{PhaseTimings, PipelineOutput, PipelineReport};
pub use rescale::ResampleMode;
