//! The contour tile set.
//!
//! Marching squares classifies every grid cell into one of 16 corner
//! configurations. Each configuration has a pre-rendered `step x step` tile
//! that is stamped into the canvas. Tiles are loaded once, before any worker
//! starts, from `<dir>/0.ppm` .. `<dir>/15.ppm`.

use std::path::{Path, PathBuf};

use contour_common::{ContourError, ContourResult};
use tracing::debug;

use crate::bitmap::Image;
use crate::ppm::read_ppm;

/// Number of corner configurations (and tiles).
pub const CONTOUR_CONFIG_COUNT: usize = 16;

/// 4-bit corner configuration of one grid cell.
///
/// bit3 = top-left, bit2 = top-right, bit1 = bottom-right, bit0 = bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigKey(u8);

impl ConfigKey {
    /// Build a key from the four occupancy corners (only the low bit of each is used).
    #[inline]
    pub fn from_corners(top_left: u8, top_right: u8, bottom_right: u8, bottom_left: u8) -> Self {
        Self(
            ((top_left & 1) << 3)
                | ((top_right & 1) << 2)
                | ((bottom_right & 1) << 1)
                | (bottom_left & 1),
        )
    }

    /// Tile index selected by this key.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Corners as `[top_left, top_right, bottom_right, bottom_left]`.
    pub fn corners(self) -> [u8; 4] {
        [(self.0 >> 3) & 1, (self.0 >> 2) & 1, (self.0 >> 1) & 1, self.0 & 1]
    }

    /// All 16 keys in index order.
    pub fn all() -> impl Iterator<Item = ConfigKey> {
        (0..CONTOUR_CONFIG_COUNT as u8).map(ConfigKey)
    }
}

/// The 16 contour tiles, indexed by `ConfigKey`.
#[derive(Debug, Clone)]
pub struct ContourTileSet {
    step: usize,
    tiles: Vec<Image>,
}

impl ContourTileSet {
    /// Path of tile `index` inside `dir`.
    pub fn tile_path(dir: &Path, index: usize) -> PathBuf {
        dir.join(format!("{}.ppm", index))
    }

    /// Load all 16 tiles from `dir`. Each must be `step x step`.
    pub fn load(dir: impl AsRef<Path>, step: usize) -> ContourResult<Self> {
        let dir = dir.as_ref();
        let mut tiles = Vec::with_capacity(CONTOUR_CONFIG_COUNT);

        for index in 0..CONTOUR_CONFIG_COUNT {
            let path = Self::tile_path(dir, index);
            if !path.is_file() {
                return Err(ContourError::MissingTile { index, path });
            }
            tiles.push(read_ppm(&path)?);
        }

        let set = Self::from_tiles(tiles, step)?;
        debug!(dir = %dir.display(), step, "Loaded contour tile set");
        Ok(set)
    }

    /// Build a tile set from 16 in-memory tiles.
    pub fn from_tiles(tiles: Vec<Image>, step: usize) -> ContourResult<Self> {
        if tiles.len() != CONTOUR_CONFIG_COUNT {
            return Err(ContourError::InvalidTile {
                index: tiles.len(),
                message: format!(
                    "expected {} tiles, got {}",
                    CONTOUR_CONFIG_COUNT,
                    tiles.len()
                ),
            });
        }

        for (index, tile) in tiles.iter().enumerate() {
            if tile.width() != step || tile.height() != step {
                return Err(ContourError::InvalidTile {
                    index,
                    message: format!(
                        "expected {}x{}, got {}x{}",
                        step,
                        step,
                        tile.width(),
                        tile.height()
                    ),
                });
            }
        }

        Ok(Self { step, tiles })
    }

    /// Tile edge in pixels.
    pub fn step(&self) -> usize {
        self.step
    }

    #[inline]
    pub fn get(&self, key: ConfigKey) -> &Image {
        &self.tiles[key.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConfigKey, &Image)> {
        ConfigKey::all().zip(self.tiles.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_key_bit_layout() {
        assert_eq!(ConfigKey::from_corners(1, 0, 0, 0).index(), 8);
        assert_eq!(ConfigKey::from_corners(0, 1, 0, 0).index(), 4);
        assert_eq!(ConfigKey::from_corners(0, 0, 1, 0).index(), 2);
        assert_eq!(ConfigKey::from_corners(0, 0, 0, 1).index(), 1);
        assert_eq!(ConfigKey::from_corners(1, 1, 1, 1).index(), 15);
        assert_eq!(ConfigKey::from_corners(0, 0, 0, 0).index(), 0);
    }

    #[test]
    fn test_key_bijection() {
        // Every corner combination maps to a distinct key...
        let mut seen = HashSet::new();
        for bits in 0..16u8 {
            let corners = [(bits >> 3) & 1, (bits >> 2) & 1, (bits >> 1) & 1, bits & 1];
            let key = ConfigKey::from_corners(corners[0], corners[1], corners[2], corners[3]);
            assert_eq!(key.corners(), corners);
            assert!(seen.insert(key.index()));
        }
        // ...and every tile index is reachable.
        assert_eq!(seen, (0..CONTOUR_CONFIG_COUNT).collect::<HashSet<_>>());
    }

    #[test]
    fn test_from_tiles_checks_count_and_size() {
        let tiles = vec![Image::filled(4, 4, [0, 0, 0]); 15];
        assert!(ContourTileSet::from_tiles(tiles, 4).is_err());

        let mut tiles = vec![Image::filled(4, 4, [0, 0, 0]); 16];
        tiles[7] = Image::filled(4, 3, [0, 0, 0]);
        match ContourTileSet::from_tiles(tiles, 4) {
            Err(ContourError::InvalidTile { index, .. }) => assert_eq!(index, 7),
            other => panic!("expected InvalidTile, got {:?}", other),
        }
    }

    #[test]
    fn test_get_returns_indexed_tile() {
        let tiles: Vec<Image> = (0..16u8).map(|k| Image::filled(2, 2, [k, 0, 0])).collect();
        let set = ContourTileSet::from_tiles(tiles, 2).unwrap();
        for key in ConfigKey::all() {
            assert_eq!(set.get(key).pixel(0, 0)[0] as usize, key.index());
        }
    }
}
