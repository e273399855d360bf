//! Mapping between content indices and physical page positions
//!
//! A displayed book is `front matter | content pages | back matter`. Every
//! conversion between a content index and a physical page goes through
//! [`PageMapper`]; nothing else in the crate adds offsets by hand.

use crate::error::LayoutError;
use serde::{Deserialize, Serialize};

/// Where a physical page falls relative to the content block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "region", content = "offset", rename_all = "snake_case")]
pub enum Region {
    /// Before the content; offset from the first physical page
    FrontMatter(usize),

    /// A content page; the value is the content index
    Content(usize),

    /// After the content; offset from the first back-matter page
    BackMatter(usize),
}

/// Two-sided mapping for a content block of `content_len` pages preceded by
/// `front_matter` non-content pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMapper {
    front_matter: usize,
    content_len: usize,
}

impl PageMapper {
    pub const fn new(front_matter: usize, content_len: usize) -> Self {
        Self {
            front_matter,
            content_len,
        }
    }

    pub const fn front_matter(&self) -> usize {
        self.front_matter
    }

    pub const fn content_len(&self) -> usize {
        self.content_len
    }

    /// Physical position of content index `index`
    ///
    /// An index outside `0..content_len` is a caller bug and is rejected.
    pub fn to_physical(&self, index: usize) -> Result<usize, LayoutError> {
        if index >= self.content_len {
            return Err(LayoutError::ContentOutOfRange {
                index,
                len: self.content_len,
            });
        }
        Ok(index + self.front_matter)
    }

    /// Content index shown at physical position `physical`, or `None` for
    /// front and back matter
    pub fn to_content(&self, physical: usize) -> Option<usize> {
        match self.region(physical) {
            Region::Content(index) => Some(index),
            Region::FrontMatter(_) | Region::BackMatter(_) => None,
        }
    }

    /// Classify a physical position. Total over `usize`.
    pub fn region(&self, physical: usize) -> Region {
        if physical < self.front_matter {
            Region::FrontMatter(physical)
        } else if physical - self.front_matter < self.content_len {
            Region::Content(physical - self.front_matter)
        } else {
            Region::BackMatter(physical - self.front_matter - self.content_len)
        }
    }
}
