//! Flat RGB image buffer.
//!
//! Pixel `(row, col)` lives at pixel offset `row * width + col`, three bytes
//! per pixel. Every stage of the pipeline indexes through this one rule.

use contour_common::{ContourError, ContourResult};

/// Bytes per pixel (R, G, B).
pub const CHANNELS: usize = 3;

/// An 8-bit RGB image with a row-major pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Image {
    /// Allocate a black image, reporting allocation failure instead of aborting.
    pub fn try_new(width: usize, height: usize) -> ContourResult<Self> {
        let len = buffer_len(width, height)?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| ContourError::Allocation {
                what: "image buffer",
                bytes: len,
            })?;
        data.resize(len, 0);

        Ok(Self { width, height, data })
    }

    /// Create an image filled with one colour.
    pub fn filled(width: usize, height: usize, rgb: [u8; 3]) -> Self {
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take(width * height * CHANNELS)
            .collect();
        Self { width, height, data }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width * CHANNELS
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.height && col < self.width);
        (row * self.width + col) * CHANNELS
    }

    /// RGB triple at `(row, col)`.
    #[inline]
    pub fn pixel(&self, row: usize, col: usize) -> [u8; 3] {
        let i = self.offset(row, col);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    #[inline]
    pub fn set_pixel(&mut self, row: usize, col: usize, rgb: [u8; 3]) {
        let i = self.offset(row, col);
        self.data[i..i + CHANNELS].copy_from_slice(&rgb);
    }

    /// Raw bytes of one row.
    pub fn row(&self, row: usize) -> &[u8] {
        let stride = self.stride();
        &self.data[row * stride..(row + 1) * stride]
    }
}

fn buffer_len(width: usize, height: usize) -> ContourResult<usize> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| {
            ContourError::DimensionMismatch(format!("{}x{} image is too large", width, height))
        })
}

impl From<image::RgbImage> for Image {
    fn from(img: image::RgbImage) -> Self {
        let width = img.width() as usize;
        let height = img.height() as usize;
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}
