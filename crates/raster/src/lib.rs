//! Raster collaborators for the contour pipeline.
//!
//! - `Image`: flat row-major RGB buffer
//! - PPM (P6) decode/encode
//! - Catmull-Rom bicubic sampling at normalized coordinates
//! - The 16-entry contour tile set

pub mod bicubic;
pub mod bitmap;
pub mod ppm;
pub mod tiles;

pub use bicubic::sample_bicubic;
pub use bitmap::{Image, CHANNELS};
pub use ppm::{decode_ppm, encode_ppm, read_ppm, write_ppm};
pub use tiles::{ConfigKey, ContourTileSet, CONTOUR_CONFIG_COUNT};
