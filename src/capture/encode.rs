//! Pure PNG encoding with no OS access.

use super::CaptureError;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// Encodes a `DynamicImage` as PNG bytes.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, CaptureError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(CaptureError::ZeroDimension);
    }

    let mut png_bytes: Vec<u8> = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| CaptureError::EncodingFailed(e.to_string()))?;

    Ok(png_bytes)
}
