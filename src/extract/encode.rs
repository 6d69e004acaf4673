use std::io::Cursor;

use image::{ImageOutputFormat, RgbaImage};

use crate::config::ImageFormat;
use crate::error::ExtractError;
use crate::frame::FrameBuffer;

/// Encodes a buffer to the configured output format. `quality` in `(0, 1]`
/// applies to JPEG only.
pub fn encode_frame(
    buffer: &FrameBuffer,
    format: ImageFormat,
    quality: f64,
) -> Result<Vec<u8>, ExtractError> {
    // Length is guaranteed by FrameBuffer construction.
    let img = RgbaImage::from_raw(buffer.width, buffer.height, buffer.data.clone())
        .expect("frame buffer length matches dimensions");

    let output_format = match format {
        ImageFormat::Png => ImageOutputFormat::Png,
        ImageFormat::Jpg => ImageOutputFormat::Jpeg(jpeg_quality(quality)),
    };

    let mut bytes = Cursor::new(Vec::new());
    match format {
        ImageFormat::Png => img.write_to(&mut bytes, output_format)?,
        ImageFormat::Jpg => {
            // JPEG has no alpha channel
            let rgb = image::DynamicImage::ImageRgba8(img).to_rgb8();
            rgb.write_to(&mut bytes, output_format)?;
        }
    }
    Ok(bytes.into_inner())
}

/// Maps the unit-range quality factor onto the encoder's 1-100 scale.
fn jpeg_quality(quality: f64) -> u8 {
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

/// File name for one accepted frame:
/// `screenshot_{index:04}_t{timestamp:.2}s.{ext}`.
pub fn artifact_file_name(index: usize, timestamp: f64, format: ImageFormat) -> String {
    format!(
        "screenshot_{:04}_t{:.2}s.{}",
        index,
        timestamp,
        format.extension()
    )
}
