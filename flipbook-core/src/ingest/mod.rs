//! Turning uploaded files into page images
//!
//! Each supported upload format has a [`PageDecoder`]. A single image becomes
//! one page; a PDF becomes one page per embedded page image.

mod pdf;
mod raster;
mod svg;

pub use pdf::PdfDecoder;
pub use raster::RasterDecoder;
pub use svg::SvgDecoder;

use crate::error::InputError;
use rayon::prelude::*;
use std::path::Path;

/// A file as the user supplied it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Original file name, used for format hints and error messages
    pub name: String,

    /// Raw file content
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Lowercased extension of the file name, if any
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
    }
}

/// One page image ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestedImage {
    pub data: Vec<u8>,
    pub mime_type: String,
    pub width: Option<u32>,
    pub height: Option<u32>,

    /// Name of the upload this image came from
    pub source: String,
}

/// Trait for decoding one upload format into page images
pub trait PageDecoder: Send + Sync {
    /// Decode a file into its page images, in reading order
    fn decode(&self, file: &UploadedFile) -> Result<Vec<IngestedImage>, InputError>;
}

/// Get the decoder for a file extension
pub fn decoder_for_extension(ext: &str) -> Option<Box<dyn PageDecoder>> {
    match ext.to_lowercase().as_str() {
        "pdf" => Some(Box::new(PdfDecoder::new())),
        "svg" => Some(Box::new(SvgDecoder::new())),
        "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp" => Some(Box::new(RasterDecoder::new())),
        _ => None,
    }
}

/// Pick a decoder from the file's leading bytes, falling back to its extension
pub fn decoder_for_file(file: &UploadedFile) -> Option<Box<dyn PageDecoder>> {
    if pdf::looks_like_pdf(&file.data) {
        return Some(Box::new(PdfDecoder::new()));
    }
    // Formats `image` recognizes but is not built to read fall through
    if image::guess_format(&file.data).is_ok_and(raster::is_supported) {
        return Some(Box::new(RasterDecoder::new()));
    }
    if svg::looks_like_svg(&file.data) {
        return Some(Box::new(SvgDecoder::new()));
    }
    file.extension().as_deref().and_then(decoder_for_extension)
}

/// Converts user uploads into the ordered page images of a book
pub trait Ingestor: Send + Sync {
    /// Decode every file; output keeps upload order, and pages of one file stay together
    fn ingest(&self, files: &[UploadedFile]) -> Result<Vec<IngestedImage>, InputError>;
}

/// Default [`Ingestor`]: sniffs each file's format and decodes files in parallel
#[derive(Debug, Default, Clone, Copy)]
pub struct FileIngestor;

impl FileIngestor {
    pub fn new() -> Self {
        Self
    }

    fn ingest_one(file: &UploadedFile) -> Result<Vec<IngestedImage>, InputError> {
        if file.data.is_empty() {
            return Err(InputError::unreadable(&file.name, "file is empty"));
        }
        let decoder = decoder_for_file(file).ok_or_else(|| {
            InputError::UnsupportedFormat(
                file.extension().unwrap_or_else(|| file.name.clone()),
            )
        })?;
        let images = decoder.decode(file)?;
        tracing::debug!(file = %file.name, pages = images.len(), "decoded upload");
        Ok(images)
    }
}

impl Ingestor for FileIngestor {
    fn ingest(&self, files: &[UploadedFile]) -> Result<Vec<IngestedImage>, InputError> {
        let per_file: Vec<Vec<IngestedImage>> = files
            .par_iter()
            .map(Self::ingest_one)
            .collect::<Result<_, _>>()?;
        Ok(per_file.into_iter().flatten().collect())
    }
}


#[cfg(test)]
mod tests {
    use super::test_images::encoded;
    use super::*;
    use image::ImageFormat;

    #[test]
    fn test_two_images_keep_upload_order() {
        let files = vec![
            UploadedFile::new("b.png", encoded(3, 2, ImageFormat::Png)),
            UploadedFile::new("a.jpg", encoded(5, 4, ImageFormat::Jpeg)),
        ];
        let images = FileIngestor::new().ingest(&files).unwrap();

        assert_eq!(images.len(), 2);
        assert_eq!(images[0].source, "b.png");
        assert_eq!(images[0].mime_type, "image/png");
        assert_eq!((images[0].width, images[0].height), (Some(3), Some(2)));
        assert_eq!(images[1].source, "a.jpg");
        assert_eq!(images[1].mime_type, "image/jpeg");
    }

    #[test]
    fn test_content_wins_over_extension() {
        let file = UploadedFile::new("photo.gif", encoded(2, 2, ImageFormat::Png));
        let images = FileIngestor::new().ingest(&[file]).unwrap();
        assert_eq!(images[0].mime_type, "image/png");
    }

    #[test]
    fn test_empty_file_is_unreadable() {
        let err = FileIngestor::new()
            .ingest(&[UploadedFile::new("blank.png", Vec::new())])
            .unwrap_err();
        assert!(matches!(err, InputError::UnreadableFile { .. }));
    }

    #[test]
    fn test_unknown_format() {
        let err = FileIngestor::new()
            .ingest(&[UploadedFile::new("notes.txt", b"hello".to_vec())])
            .unwrap_err();
        assert_eq!(err, InputError::UnsupportedFormat("txt".to_string()));
    }

    #[test]
    fn test_unbuilt_raster_format_is_unsupported() {
        let tiff = UploadedFile::new("scan.tiff", b"II*\0\x08\0\0\0garbage".to_vec());
        let err = FileIngestor::new().ingest(&[tiff]).unwrap_err();
        assert_eq!(err, InputError::UnsupportedFormat("tiff".to_string()));

        let ico = UploadedFile::new("icon", b"\0\0\x01\0\x01\0\x10\x10".to_vec());
        assert!(decoder_for_file(&ico).is_none());
    }

    #[test]
    fn test_one_bad_file_fails_the_batch() {
        let files = vec![
            UploadedFile::new("ok.png", encoded(1, 1, ImageFormat::Png)),
            UploadedFile::new("broken.png", b"\x89PNG\r\n\x1a\ngarbage".to_vec()),
        ];
        assert!(FileIngestor::new().ingest(&files).is_err());
    }

    #[test]
    fn test_decoder_lookup() {
        assert!(decoder_for_extension("PDF").is_some());
        assert!(decoder_for_extension("jpeg").is_some());
        assert!(decoder_for_extension("docx").is_none());
    }
}
