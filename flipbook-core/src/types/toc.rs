//! Table of contents types

use super::Page;
use serde::{Deserialize, Serialize};

/// A single entry in the table of contents
///
/// Entries are always derived from the current page sequence and never stored,
/// so an entry can not point at a page that no longer exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TocEntry {
    /// Display title (the page caption, trimmed)
    pub title: String,

    /// Zero-based index into the book's content pages
    pub content_index: usize,
}

impl TocEntry {
    /// Create a new TOC entry
    pub fn new(title: impl Into<String>, content_index: usize) -> Self {
        Self {
            title: title.into(),
            content_index,
        }
    }
}

/// Build the table of contents: every page with a non-blank caption, in content order
pub fn table_of_contents(pages: &[Page]) -> Vec<TocEntry> {
    pages
        .iter()
        .enumerate()
        .filter(|(_, page)| page.has_caption())
        .map(|(index, page)| TocEntry::new(page.caption.trim(), index))
        .collect()
}
