//! SVG uploads, stored as-is

use super::{IngestedImage, PageDecoder, UploadedFile};
use crate::error::InputError;

/// How far into the file to look for the root element
const SNIFF_LEN: usize = 1024;

pub(crate) fn looks_like_svg(data: &[u8]) -> bool {
    let head = &data[..data.len().min(SNIFF_LEN)];
    String::from_utf8_lossy(head).contains("<svg")
}

/// Decoder for SVG images; the markup is kept verbatim and has no pixel size
pub struct SvgDecoder;

impl SvgDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SvgDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PageDecoder for SvgDecoder {
    fn decode(&self, file: &UploadedFile) -> Result<Vec<IngestedImage>, InputError> {
        if !looks_like_svg(&file.data) {
            return Err(InputError::unreadable(&file.name, "no <svg> root element"));
        }
        Ok(vec![IngestedImage {
            data: file.data.clone(),
            mime_type: "image/svg+xml".to_string(),
            width: None,
            height: None,
            source: file.name.clone(),
        }])
    }
}
