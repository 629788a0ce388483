//! March phase: stamp one contour tile per grid cell.

use raster::{ContourTileSet, Image, CHANNELS};
use tracing::trace;

use crate::grid::OccupancyGrid;
use crate::partition::RowBand;

/// Stamp tiles for every interior cell whose canvas rows lie in `band`.
///
/// The band covers canvas rows `[s * step, e * step)` for grid rows `[s, e)`;
/// the last band may extend further, past the final interior cell.
pub fn march_band(grid: &OccupancyGrid, tiles: &ContourTileSet, mut band: RowBand<'_, u8>) {
    let step = tiles.step();
    let first_row = band.rows.start / step;
    let end_row = (band.rows.end / step).min(grid.interior_rows());

    trace!(
        worker = band.worker,
        rows = ?band.rows,
        grid_rows = ?(first_row..end_row),
        "March band"
    );

    for i in first_row..end_row {
        for j in 0..grid.interior_cols() {
            let tile = tiles.get(grid.config_key(i, j));
            stamp_tile(&mut band, tile, i * step, j * step);
        }
    }
}

/// Overwrite the canvas pixels under `tile`, origin at `(row, col)`.
///
/// No blending: every channel of every tile pixel replaces the canvas value.
fn stamp_tile(band: &mut RowBand<'_, u8>, tile: &Image, row: usize, col: usize) {
    let offset = col * CHANNELS;
    let len = tile.stride();
    for r in 0..tile.height() {
        band.row_mut(row + r)[offset..offset + len].copy_from_slice(tile.row(r));
    }
}
