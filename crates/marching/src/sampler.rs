//! Sample phase: threshold the canvas into the occupancy grid.

use contour_common::MarchingConfig;
use raster::Image;
use tracing::trace;

use crate::grid::{BACKGROUND, FOREGROUND};
use crate::partition::RowBand;

/// Integer mean of the three channels, truncating.
#[inline]
pub fn luminance(rgb: [u8; 3]) -> u8 {
    ((rgb[0] as u16 + rgb[1] as u16 + rgb[2] as u16) / 3) as u8
}

/// Background if brighter than `sigma`, foreground otherwise.
#[inline]
pub fn classify(rgb: [u8; 3], sigma: u8) -> u8 {
    if luminance(rgb) > sigma {
        BACKGROUND
    } else {
        FOREGROUND
    }
}

/// Fill one band of grid rows from the fully rescaled canvas.
///
/// Interior cell `(i, j)` samples canvas pixel `(i * step, j * step)`. The
/// boundary column samples the rightmost canvas pixel of row `i * step`, and
/// the boundary row (owned only by the last band) samples the bottom canvas
/// row.
pub fn sample_band(canvas: &Image, mut band: RowBand<'_, u8>, config: &MarchingConfig) {
    trace!(worker = band.worker, rows = ?band.rows, "Sample band");

    let step = config.step;
    let sigma = config.sigma;
    let interior_rows = canvas.height() / step;
    let interior_cols = canvas.width() / step;
    let last_col = canvas.width() - 1;

    // Forced-zero reset. Every cell of the band is overwritten by the passes
    // below, so this write never reaches the output.
    band.data.fill(BACKGROUND);

    for i in band.rows.clone() {
        let y = if i < interior_rows {
            i * step
        } else {
            canvas.height() - 1
        };

        let cells = band.row_mut(i);
        for (j, cell) in cells[..interior_cols].iter_mut().enumerate() {
            *cell = classify(canvas.pixel(y, j * step), sigma);
        }
        cells[interior_cols] = classify(canvas.pixel(y, last_col), sigma);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::OccupancyGrid;
    use crate::partition::{grid_partition, split_bands};

    fn sample_all(canvas: &Image, config: &MarchingConfig, workers: usize) -> OccupancyGrid {
        let mut grid = OccupancyGrid::try_new(canvas.width(), canvas.height(), config.step).unwrap();
        let cols = grid.cols();
        let ranges = grid_partition(grid.interior_rows(), workers);
        for band in split_bands(grid.cells_mut(), cols, &ranges) {
            sample_band(canvas, band, config);
        }
        grid
    }

    #[test]
    fn test_luminance_truncates() {
        assert_eq!(luminance([255, 255, 255]), 255);
        assert_eq!(luminance([1, 1, 0]), 0);
        assert_eq!(luminance([200, 201, 201]), 200);
    }

    #[test]
    fn test_threshold_monotonicity() {
        let sigma = 200;
        for lum in 0..=255u8 {
            let expected = if lum > sigma { BACKGROUND } else { FOREGROUND };
            assert_eq!(classify([lum, lum, lum], sigma), expected, "lum {}", lum);
        }
        // Exactly at the cutoff is foreground.
        assert_eq!(classify([200, 200, 200], 200), FOREGROUND);
        assert_eq!(classify([201, 201, 201], 200), BACKGROUND);
    }

    #[test]
    fn test_white_canvas_is_all_background() {
        let canvas = Image::filled(64, 64, [255, 255, 255]);
        let grid = sample_all(&canvas, &MarchingConfig::default(), 3);
        assert_eq!(grid.rows(), 9);
        assert_eq!(grid.cols(), 9);
        assert!(grid.cells().iter().all(|&c| c == BACKGROUND));
    }

    #[test]
    fn test_black_canvas_is_all_foreground() {
        // Every cell, boundary row and column included, reflects its sample.
        let canvas = Image::filled(40, 24, [0, 0, 0]);
        for workers in [1, 2, 3, 7] {
            let grid = sample_all(&canvas, &MarchingConfig::default(), workers);
            assert!(grid.cells().iter().all(|&c| c == FOREGROUND), "workers {}", workers);
        }
    }

    #[test]
    fn test_every_owned_cell_is_resampled() {
        // Stale grid contents and the reset value both vanish: only samples remain.
        let canvas = Image::filled(40, 24, [0, 0, 0]);
        let config = MarchingConfig::default();
        for workers in [1, 2, 4] {
            let mut grid = OccupancyGrid::try_new(40, 24, config.step).unwrap();
            grid.cells_mut().fill(7);
            let cols = grid.cols();
            let ranges = grid_partition(grid.interior_rows(), workers);
            for band in split_bands(grid.cells_mut(), cols, &ranges) {
                sample_band(&canvas, band, &config);
            }
            assert!(grid.cells().iter().all(|&c| c == FOREGROUND), "workers {}", workers);
        }
    }

    #[test]
    fn test_cell_samples_top_left_pixel() {
        let mut canvas = Image::filled(16, 16, [255, 255, 255]);
        // Dark pixel at the top-left of cell (1, 0) only.
        canvas.set_pixel(8, 0, [0, 0, 0]);
        // Dark pixel inside cell (0, 1), not on its corner: ignored.
        canvas.set_pixel(3, 11, [0, 0, 0]);

        let grid = sample_all(&canvas, &MarchingConfig::default(), 1);
        assert_eq!(grid.get(1, 0), FOREGROUND);
        assert_eq!(grid.get(0, 1), BACKGROUND);
        assert_eq!(grid.get(0, 0), BACKGROUND);
    }

    #[test]
    fn test_boundary_row_and_column() {
        let mut canvas = Image::filled(16, 16, [255, 255, 255]);
        // Rightmost pixel of canvas row 8 feeds boundary column of grid row 1.
        canvas.set_pixel(8, 15, [0, 0, 0]);
        // Bottom canvas row at column 8 feeds boundary row, column 1.
        canvas.set_pixel(15, 8, [0, 0, 0]);
        // Bottom-right pixel feeds the corner.
        canvas.set_pixel(15, 15, [0, 0, 0]);

        let grid = sample_all(&canvas, &MarchingConfig::default(), 2);
        assert_eq!(grid.get(1, 2), FOREGROUND);
        assert_eq!(grid.get(0, 2), BACKGROUND);
        assert_eq!(grid.get(2, 1), FOREGROUND);
        assert_eq!(grid.get(2, 0), BACKGROUND);
        assert_eq!(grid.get(2, 2), FOREGROUND);
    }

    #[test]
    fn test_band_split_does_not_change_grid() {
        let mut canvas = Image::filled(48, 56, [255, 255, 255]);
        for row in 0..56 {
            for col in 0..48 {
                if (row / 8 + col / 8) % 3 == 0 {
                    canvas.set_pixel(row, col, [10, 10, 10]);
                }
            }
        }
        let config = MarchingConfig::default();
        let one = sample_all(&canvas, &config, 1);
        for workers in [2, 4, 7, 12] {
            assert_eq!(sample_all(&canvas, &config, workers), one, "workers {}", workers);
        }
    }
}
