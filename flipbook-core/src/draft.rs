//! Unpersisted book being captioned before creation
//!
//! Nothing in a draft is stored until it is handed to
//! [`Library::create_book`](crate::Library::create_book); dropping a draft
//! discards it.

use crate::error::{InputError, LayoutError};
use crate::ingest::IngestedImage;

/// An ingested image waiting for its caption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftPage {
    pub image: IngestedImage,
    pub caption: String,
}

impl DraftPage {
    /// New pages start without a caption
    pub fn new(image: IngestedImage) -> Self {
        Self {
            image,
            caption: String::new(),
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }
}

/// Title and pages collected during the title-editing step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub pages: Vec<DraftPage>,
}

impl BookDraft {
    /// One uncaptioned page per image, in the given order
    pub fn from_images(images: impl IntoIterator<Item = IngestedImage>) -> Self {
        Self {
            title: String::new(),
            pages: images.into_iter().map(DraftPage::new).collect(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Apply captions positionally; extra captions are ignored
    pub fn with_captions<S: AsRef<str>>(mut self, captions: impl IntoIterator<Item = S>) -> Self {
        for (page, caption) in self.pages.iter_mut().zip(captions) {
            page.caption = caption.as_ref().trim().to_string();
        }
        self
    }

    pub fn set_caption(&mut self, index: usize, caption: &str) -> Result<(), LayoutError> {
        let len = self.pages.len();
        let page = self
            .pages
            .get_mut(index)
            .ok_or(LayoutError::ContentOutOfRange { index, len })?;
        page.caption = caption.trim().to_string();
        Ok(())
    }

    pub fn remove_page(&mut self, index: usize) -> Result<DraftPage, LayoutError> {
        if index >= self.pages.len() {
            return Err(LayoutError::ContentOutOfRange {
                index,
                len: self.pages.len(),
            });
        }
        Ok(self.pages.remove(index))
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Check that the draft can become a book
    pub fn validate(&self) -> Result<(), InputError> {
        crate::types::normalize_title(&self.title)?;
        if self.pages.is_empty() {
            return Err(InputError::NoPages);
        }
        Ok(())
    }
}
