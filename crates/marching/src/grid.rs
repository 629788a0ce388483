//! Binary occupancy grid.

use contour_common::{ContourError, ContourResult};
use raster::{ConfigKey, CONTOUR_CONFIG_COUNT};

/// Cell brighter than the luminance cutoff.
pub const BACKGROUND: u8 = 0;
/// Cell at or below the luminance cutoff.
pub const FOREGROUND: u8 = 1;

/// Occupancy values for a canvas, one per `step x step` cell.
///
/// For a `width x height` canvas the grid has `height / step + 1` rows and
/// `width / step + 1` columns: the interior cells plus one boundary row and
/// column. Stored as a single flat buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl OccupancyGrid {
    /// Allocate the grid for a canvas, all background.
    pub fn try_new(canvas_width: usize, canvas_height: usize, step: usize) -> ContourResult<Self> {
        if step == 0 {
            return Err(ContourError::invalid_config("step must be > 0"));
        }

        let rows = canvas_height / step + 1;
        let cols = canvas_width / step + 1;
        let len = rows * cols;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| ContourError::Allocation {
                what: "occupancy grid",
                bytes: len,
            })?;
        cells.resize(len, BACKGROUND);

        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Rows of marchable cells (excludes the boundary row).
    pub fn interior_rows(&self) -> usize {
        self.rows - 1
    }

    /// Columns of marchable cells (excludes the boundary column).
    pub fn interior_cols(&self) -> usize {
        self.cols - 1
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        self.cells[row * self.cols + col] = value;
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    /// Corner configuration of interior cell `(row, col)`.
    #[inline]
    pub fn config_key(&self, row: usize, col: usize) -> ConfigKey {
        ConfigKey::from_corners(
            self.get(row, col),
            self.get(row, col + 1),
            self.get(row + 1, col + 1),
            self.get(row + 1, col),
        )
    }

    /// How often each key occurs over the interior cells.
    pub fn key_histogram(&self) -> [usize; CONTOUR_CONFIG_COUNT] {
        let mut histogram = [0usize; CONTOUR_CONFIG_COUNT];
        for row in 0..self.interior_rows() {
            for col in 0..self.interior_cols() {
                histogram[self.config_key(row, col).index()] += 1;
            }
        }
        histogram
    }
}
