//! JPEG output for blended canvases and fragment grids.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;

use crate::error::{BlendError, Result};

/// Encoder quality used for every saved image.
pub const JPEG_QUALITY: u8 = 95;

/// Write an RGB image as a JPEG file.
///
/// # Arguments
///
/// * `image` - The image to write
/// * `path` - Output file path
/// * `quality` - Encoder quality, 1 to 100
pub fn write_jpeg(image: &RgbImage, path: &Path, quality: u8) -> Result<()> {
    let file = File::create(path).map_err(|e| BlendError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to create image file: {}", e),
    })?;

    let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), quality.clamp(1, 100));
    encoder
        .encode_image(image)
        .map_err(|e| BlendError::image(path, format!("Failed to write JPEG: {}", e)))?;

    Ok(())
}
