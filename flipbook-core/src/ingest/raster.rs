//! Raster image uploads (PNG, JPEG, GIF, WebP, BMP)

use super::{IngestedImage, PageDecoder, UploadedFile};
use crate::error::InputError;
use image::{ImageFormat, ImageReader};
use std::io::Cursor;

/// Decoder for single raster images
///
/// Only the header is decoded: enough to prove the file is readable and to
/// learn its dimensions. The stored bytes are the upload, untouched.
pub struct RasterDecoder;

impl RasterDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RasterDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Raster formats this build can read
pub(crate) fn is_supported(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Gif | ImageFormat::WebP | ImageFormat::Bmp
    )
}

/// Sniff the format of `data` and read its dimensions
pub(crate) fn probe(name: &str, data: &[u8]) -> Result<(ImageFormat, u32, u32), InputError> {
    let format = image::guess_format(data).map_err(|e| InputError::unreadable(name, e))?;
    let (width, height) = ImageReader::with_format(Cursor::new(data), format)
        .into_dimensions()
        .map_err(|e| InputError::unreadable(name, e))?;
    Ok((format, width, height))
}

impl PageDecoder for RasterDecoder {
    fn decode(&self, file: &UploadedFile) -> Result<Vec<IngestedImage>, InputError> {
        let (format, width, height) = probe(&file.name, &file.data)?;
        Ok(vec![IngestedImage {
            data: file.data.clone(),
            mime_type: format.to_mime_type().to_string(),
            width: Some(width),
            height: Some(height),
            source: file.name.clone(),
        }])
    }
}
