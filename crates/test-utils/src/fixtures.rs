//! Contour tile set fixtures.
//!
//! Synthetic tiles encode their own key and pixel position so a test can
//! read back from the canvas which tile was stamped where, and whether it
//! was stamped the right way round.

use std::path::Path;

use raster::{write_ppm, ContourTileSet, Image, CONTOUR_CONFIG_COUNT};
use tempfile::TempDir;

/// Pixel value of synthetic tile `key` at `(row, col)`.
///
/// Red carries the key (`key * 16`), green the row, blue the column.
pub fn tile_pixel(key: usize, row: usize, col: usize) -> [u8; 3] {
    [
        (key as u8).wrapping_mul(16),
        (row as u8).wrapping_mul(31),
        (col as u8).wrapping_mul(29),
    ]
}

/// Recover the key from a pixel written by a synthetic tile.
pub fn key_of_pixel(rgb: [u8; 3]) -> usize {
    (rgb[0] / 16) as usize
}

/// One synthetic tile.
pub fn synthetic_tile(key: usize, step: usize) -> Image {
    let mut tile = Image::filled(step, step, [0, 0, 0]);
    for row in 0..step {
        for col in 0..step {
            tile.set_pixel(row, col, tile_pixel(key, row, col));
        }
    }
    tile
}

/// All 16 synthetic tiles.
pub fn synthetic_tile_set(step: usize) -> ContourTileSet {
    let tiles = (0..CONTOUR_CONFIG_COUNT)
        .map(|key| synthetic_tile(key, step))
        .collect();
    ContourTileSet::from_tiles(tiles, step).expect("synthetic tiles are well-formed")
}

/// Write a tile set as `0.ppm` .. `15.ppm` into `dir`.
pub fn write_tile_dir(dir: &Path, tiles: &ContourTileSet) {
    for (key, tile) in tiles.iter() {
        let path = ContourTileSet::tile_path(dir, key.index());
        write_ppm(tile, &path).expect("failed to write tile fixture");
    }
}

/// Temporary directory holding the synthetic tile set.
pub fn synthetic_tile_dir(step: usize) -> TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    write_tile_dir(dir.path(), &synthetic_tile_set(step));
    dir
}

/// Key of the synthetic tile stamped at grid cell `(i, j)` of `canvas`.
pub fn stamped_key(canvas: &Image, step: usize, i: usize, j: usize) -> usize {
    key_of_pixel(canvas.pixel(i * step, j * step))
}
