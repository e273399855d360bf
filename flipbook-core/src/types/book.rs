//! The main Book type

use super::{table_of_contents, BlobId, Page, TocEntry};
use crate::error::{InputError, LayoutError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A flipbook owned by a single user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    /// Unique identifier for this book
    pub id: Uuid,

    /// Book title, never blank
    pub title: String,

    /// Content pages in reading order
    pub pages: Vec<Page>,

    /// When the title-editing step was confirmed
    pub created_at: DateTime<Utc>,

    /// Last mutation
    pub updated_at: DateTime<Utc>,
}

/// Trim a title, rejecting blank input
pub fn normalize_title(title: &str) -> Result<String, InputError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(InputError::MissingTitle);
    }
    Ok(title.to_string())
}

impl Book {
    /// Create an empty book with the given title
    pub fn new(title: &str) -> Result<Self, InputError> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            title: normalize_title(title)?,
            pages: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Create a book with an initial page sequence
    pub fn with_pages(title: &str, pages: Vec<Page>) -> Result<Self, InputError> {
        let mut book = Self::new(title)?;
        book.pages = pages;
        Ok(book)
    }

    /// Number of content pages
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Derive the table of contents from the current pages
    pub fn toc(&self) -> Vec<TocEntry> {
        table_of_contents(&self.pages)
    }

    /// Replace the title
    pub fn set_title(&mut self, title: &str) -> Result<(), InputError> {
        self.title = normalize_title(title)?;
        self.touch();
        Ok(())
    }

    /// Append pages at the end, keeping their order
    pub fn append_pages(&mut self, pages: impl IntoIterator<Item = Page>) {
        self.pages.extend(pages);
        self.touch();
    }

    /// Set the caption of one page; ordering is unaffected
    pub fn set_caption(&mut self, index: usize, caption: &str) -> Result<(), LayoutError> {
        let len = self.pages.len();
        let page = self
            .pages
            .get_mut(index)
            .ok_or(LayoutError::ContentOutOfRange { index, len })?;
        page.caption = caption.trim().to_string();
        self.touch();
        Ok(())
    }

    /// Remove one page; every later page shifts down by one
    pub fn remove_page(&mut self, index: usize) -> Result<Page, LayoutError> {
        if index >= self.pages.len() {
            return Err(LayoutError::ContentOutOfRange {
                index,
                len: self.pages.len(),
            });
        }
        let page = self.pages.remove(index);
        self.touch();
        Ok(page)
    }

    /// Blob ids referenced by this book, in page order
    pub fn blob_ids(&self) -> impl Iterator<Item = BlobId> + '_ {
        self.pages.iter().map(|p| p.image.blob)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
