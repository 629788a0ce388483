//! PPM (portable pixmap) decode and encode.
//!
//! Output is always binary P6 with 8-bit samples. Input may be any PNM
//! variant the `image` crate understands; it is converted to RGB.

use std::fs;
use std::path::Path;

use contour_common::{ContourError, ContourResult};
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ColorType, ImageEncoder, ImageFormat};
use tracing::debug;

use crate::bitmap::Image;

/// Read a pixmap file from disk.
pub fn read_ppm(path: impl AsRef<Path>) -> ContourResult<Image> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| ContourError::decode(path, e.to_string()))?;
    let image = decode_ppm(&bytes).map_err(|e| match e {
        ContourError::Decode { message, .. } => ContourError::decode(path, message),
        other => other,
    })?;

    debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Read pixmap"
    );

    Ok(image)
}

/// Decode an in-memory pixmap.
pub fn decode_ppm(bytes: &[u8]) -> ContourResult<Image> {
    let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Pnm)
        .map_err(|e| ContourError::decode("<memory>", e.to_string()))?;
    Ok(Image::from(decoded.to_rgb8()))
}

/// Encode an image as a binary P6 pixmap.
pub fn encode_ppm(image: &Image) -> ContourResult<Vec<u8>> {
    let width = u32::try_from(image.width())
        .map_err(|_| ContourError::encode("<memory>", "width exceeds u32"))?;
    let height = u32::try_from(image.height())
        .map_err(|_| ContourError::encode("<memory>", "height exceeds u32"))?;

    let mut buf = Vec::with_capacity(image.data().len() + 32);
    PnmEncoder::new(&mut buf)
        .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Binary))
        .write_image(image.data(), width, height, ColorType::Rgb8)
        .map_err(|e| ContourError::encode("<memory>", e.to_string()))?;

    Ok(buf)
}

/// Write an image to disk as a binary P6 pixmap.
pub fn write_ppm(image: &Image, path: impl AsRef<Path>) -> ContourResult<()> {
    let path = path.as_ref();
    let bytes = encode_ppm(image).map_err(|e| match e {
        ContourError::Encode { message, .. } => ContourError::encode(path, message),
        other => other,
    })?;
    fs::write(path, &bytes).map_err(|e| ContourError::encode(path, e.to_string()))?;

    debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        bytes = bytes.len(),
        "Wrote pixmap"
    );

    Ok(())
}
