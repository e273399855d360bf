//! PDF uploads

use super::raster::probe;
use super::{IngestedImage, PageDecoder, UploadedFile};
use crate::error::InputError;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

pub(crate) fn looks_like_pdf(data: &[u8]) -> bool {
    data.starts_with(b"%PDF-")
}

/// Decoder for PDF documents
///
/// Scanned documents and image exports carry each page as an embedded JPEG
/// (`DCTDecode`) or JPEG 2000 (`JPXDecode`) image XObject. Those streams are
/// already complete image files, so they are lifted out byte for byte in page
/// order. Vector-only pages and raw-pixel images are skipped; rasterizing them
/// needs a PDF renderer.
pub struct PdfDecoder;

impl PdfDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Image XObjects reachable from a page's resources, own and inherited
    fn page_images(doc: &Document, page_id: ObjectId) -> Vec<&Stream> {
        let (direct, inherited) = doc.get_page_resources(page_id);
        let mut resources: Vec<&Dictionary> = direct.into_iter().collect();
        resources.extend(
            inherited
                .into_iter()
                .filter_map(|id| doc.get_dictionary(id).ok()),
        );

        let mut streams = Vec::new();
        for resource in resources {
            let Some(xobjects) = resource
                .get(b"XObject")
                .ok()
                .and_then(|obj| resolve_dictionary(doc, obj))
            else {
                continue;
            };
            for (_, obj) in xobjects.iter() {
                if let Some(stream) = resolve_stream(doc, obj) {
                    if is_image(stream) {
                        streams.push(stream);
                    }
                }
            }
        }
        streams
    }
}

impl Default for PdfDecoder {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_dictionary<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Dictionary> {
    match obj {
        Object::Dictionary(dict) => Some(dict),
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        _ => None,
    }
}

fn resolve_stream<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Stream> {
    match obj {
        Object::Stream(stream) => Some(stream),
        Object::Reference(id) => doc.get_object(*id).ok()?.as_stream().ok(),
        _ => None,
    }
}

fn is_image(stream: &Stream) -> bool {
    stream
        .dict
        .get(b"Subtype")
        .and_then(Object::as_name)
        .map(|name| name == b"Image")
        .unwrap_or(false)
}

/// MIME type of a stream that is a complete encoded image file
fn encoded_mime_type(stream: &Stream) -> Option<&'static str> {
    let filter = match stream.dict.get(b"Filter").ok()? {
        Object::Name(name) => name.as_slice(),
        Object::Array(filters) if filters.len() == 1 => filters[0].as_name().ok()?,
        _ => return None,
    };
    match filter {
        b"DCTDecode" => Some("image/jpeg"),
        b"JPXDecode" => Some("image/jp2"),
        _ => None,
    }
}

impl PageDecoder for PdfDecoder {
    fn decode(&self, file: &UploadedFile) -> Result<Vec<IngestedImage>, InputError> {
        let doc = Document::load_mem(&file.data)
            .map_err(|e| InputError::unreadable(&file.name, e))?;

        let mut images = Vec::new();
        for (page_number, page_id) in doc.get_pages() {
            let mut found = 0;
            for stream in Self::page_images(&doc, page_id) {
                let Some(mime_type) = encoded_mime_type(stream) else {
                    continue;
                };
                let (width, height) = if mime_type == "image/jpeg" {
                    let (_, width, height) = probe(&file.name, &stream.content)?;
                    (Some(width), Some(height))
                } else {
                    (None, None)
                };
                images.push(IngestedImage {
                    data: stream.content.clone(),
                    mime_type: mime_type.to_string(),
                    width,
                    height,
                    source: format!("{}#page={}", file.name, page_number),
                });
                found += 1;
            }
            if found == 0 {
                tracing::debug!(file = %file.name, page = page_number, "page has no embedded image");
            }
        }

        if images.is_empty() {
            return Err(InputError::unreadable(
                &file.name,
                "document has no embedded page images",
            ));
        }
        Ok(images)
    }
}
