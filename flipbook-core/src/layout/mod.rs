//! Physical page layout of a displayed flipbook

mod mapper;
mod navigator;

pub use mapper::{PageMapper, Region};
pub use navigator::{Indicator, Navigator, SWIPE_THRESHOLD};

use crate::error::LayoutError;
use crate::types::{Book, TocEntry};
use serde::{Deserialize, Serialize};

/// How non-content pages are arranged around the content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Show a cover page before the table of contents
    pub cover: bool,

    /// TOC entries that fit on one physical page
    pub toc_entries_per_page: usize,

    /// Show a closing page after the last content page
    pub back_cover: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            cover: false,
            toc_entries_per_page: 12,
            back_cover: true,
        }
    }
}

/// What occupies a physical page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageSlot {
    Cover,
    TableOfContents { sheet: usize },
    Content { index: usize },
    BackCover,
}

/// A TOC entry together with the physical page it jumps to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocTarget {
    #[serde(flatten)]
    pub entry: TocEntry,
    pub physical_page: usize,
}

/// Resolved layout for one book state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLayout {
    mapper: PageMapper,
    cover: bool,
    toc_sheets: usize,
    toc_entries_per_page: usize,
    back_matter: usize,
}

impl BookLayout {
    /// Lay out `content_len` pages whose table of contents has `toc_len` entries
    pub fn new(
        content_len: usize,
        toc_len: usize,
        options: LayoutOptions,
    ) -> Result<Self, LayoutError> {
        if options.toc_entries_per_page == 0 {
            return Err(LayoutError::ZeroEntriesPerSheet);
        }
        let toc_sheets = toc_len.div_ceil(options.toc_entries_per_page).max(1);
        let front_matter = usize::from(options.cover) + toc_sheets;

        Ok(Self {
            mapper: PageMapper::new(front_matter, content_len),
            cover: options.cover,
            toc_sheets,
            toc_entries_per_page: options.toc_entries_per_page,
            back_matter: usize::from(options.back_cover),
        })
    }

    /// Lay out a book with its current table of contents
    pub fn for_book(book: &Book, options: LayoutOptions) -> Result<Self, LayoutError> {
        Self::new(book.len(), book.toc().len(), options)
    }

    pub fn mapper(&self) -> &PageMapper {
        &self.mapper
    }

    pub fn content_len(&self) -> usize {
        self.mapper.content_len()
    }

    pub fn front_matter(&self) -> usize {
        self.mapper.front_matter()
    }

    pub fn toc_sheets(&self) -> usize {
        self.toc_sheets
    }

    /// Physical position of the first table-of-contents page
    pub fn first_toc_page(&self) -> usize {
        usize::from(self.cover)
    }

    /// Total number of physical pages, including front and back matter
    pub fn total_pages(&self) -> usize {
        self.front_matter() + self.content_len() + self.back_matter
    }

    /// Last valid physical position
    pub fn last_page(&self) -> usize {
        self.total_pages().saturating_sub(1)
    }

    /// What occupies `physical`, or `None` past the end of the book
    pub fn slot(&self, physical: usize) -> Option<PageSlot> {
        if physical >= self.total_pages() {
            return None;
        }
        Some(match self.mapper.region(physical) {
            Region::FrontMatter(0) if self.cover => PageSlot::Cover,
            Region::FrontMatter(offset) => PageSlot::TableOfContents {
                sheet: offset - usize::from(self.cover),
            },
            Region::Content(index) => PageSlot::Content { index },
            Region::BackMatter(_) => PageSlot::BackCover,
        })
    }

    /// Entries printed on TOC sheet `sheet`
    pub fn toc_sheet<'a>(&self, toc: &'a [TocEntry], sheet: usize) -> &'a [TocEntry] {
        toc.chunks(self.toc_entries_per_page)
            .nth(sheet)
            .unwrap_or_default()
    }

    /// Resolve every TOC entry to its jump target
    pub fn toc_targets(&self, toc: &[TocEntry]) -> Result<Vec<TocTarget>, LayoutError> {
        toc.iter()
            .map(|entry| {
                Ok(TocTarget {
                    entry: entry.clone(),
                    physical_page: self.mapper.to_physical(entry.content_index)?,
                })
            })
            .collect()
    }
}
