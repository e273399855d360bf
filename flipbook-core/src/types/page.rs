//! Content pages and references to their stored images

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of an image in the blob store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobId(Uuid);

impl BlobId {
    /// Generate a fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BlobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for BlobId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for BlobId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Reference to externally stored image content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageRef {
    /// Blob store key
    pub blob: BlobId,

    /// MIME type (e.g., "image/png")
    pub mime_type: String,

    /// Pixel width, when the header could be read
    pub width: Option<u32>,

    /// Pixel height, when the header could be read
    pub height: Option<u32>,

    /// Name of the uploaded file this image came from
    pub original_filename: Option<String>,
}

impl ImageRef {
    pub fn new(blob: BlobId, mime_type: impl Into<String>) -> Self {
        Self {
            blob,
            mime_type: mime_type.into(),
            width: None,
            height: None,
            original_filename: None,
        }
    }

    /// Set the pixel dimensions
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set the original filename
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.original_filename = Some(filename.into());
        self
    }
}

/// A single content page: one image plus an optional caption
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page {
    /// The page image
    pub image: ImageRef,

    /// Caption; empty means the page has no TOC entry
    #[serde(default)]
    pub caption: String,
}

impl Page {
    /// Create an uncaptioned page
    pub fn new(image: ImageRef) -> Self {
        Self {
            image,
            caption: String::new(),
        }
    }

    /// Set the caption
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    /// Whether this page shows up in the table of contents
    pub fn has_caption(&self) -> bool {
        !self.caption.trim().is_empty()
    }
}
