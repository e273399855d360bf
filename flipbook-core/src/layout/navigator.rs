//! Page-turning state for a viewer

use super::{BookLayout, PageSlot, Region};
use crate::error::LayoutError;
use crate::types::TocEntry;
use serde::{Deserialize, Serialize};

/// Horizontal drag distance (in pixels) that turns a page
pub const SWIPE_THRESHOLD: f32 = 20.0;

/// Status line shown under the book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Indicator {
    /// The book has no content pages
    Empty,
    /// Cover or table of contents
    TableOfContents,
    /// One-based page number out of the content total
    Page { number: usize, total: usize },
    /// Past the last content page
    Finished,
}

/// Tracks the current physical page of a book being read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    layout: BookLayout,
    current: usize,
}

impl Navigator {
    /// Start on the first physical page
    pub fn new(layout: BookLayout) -> Self {
        Self { layout, current: 0 }
    }

    /// Start on `physical`, clamped to the book
    pub fn at(layout: BookLayout, physical: usize) -> Self {
        Self {
            layout,
            current: physical.min(layout.last_page()),
        }
    }

    pub fn layout(&self) -> &BookLayout {
        &self.layout
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_slot(&self) -> Option<PageSlot> {
        self.layout.slot(self.current)
    }

    pub fn can_go_next(&self) -> bool {
        self.current < self.layout.last_page()
    }

    pub fn can_go_prev(&self) -> bool {
        self.current > 0
    }

    pub fn next(&mut self) -> usize {
        self.current = (self.current + 1).min(self.layout.last_page());
        self.current
    }

    pub fn prev(&mut self) -> usize {
        self.current = self.current.saturating_sub(1);
        self.current
    }

    pub fn go_to_toc(&mut self) -> usize {
        self.current = self.layout.first_toc_page();
        self.current
    }

    /// Jump to a content page through the mapper
    pub fn go_to_content(&mut self, index: usize) -> Result<usize, LayoutError> {
        self.current = self.layout.mapper().to_physical(index)?;
        Ok(self.current)
    }

    pub fn open_toc_entry(&mut self, entry: &TocEntry) -> Result<usize, LayoutError> {
        self.go_to_content(entry.content_index)
    }

    /// Turn a page for a completed drag of `delta_x` pixels.
    /// Dragging left turns forward.
    pub fn swipe(&mut self, delta_x: f32) -> usize {
        if delta_x < -SWIPE_THRESHOLD {
            self.next()
        } else if delta_x > SWIPE_THRESHOLD {
            self.prev()
        } else {
            self.current
        }
    }

    /// Adopt a new layout after pages changed, keeping the position when it
    /// still exists
    pub fn relayout(&mut self, layout: BookLayout) {
        self.layout = layout;
        self.current = self.current.min(layout.last_page());
    }

    pub fn indicator(&self) -> Indicator {
        let total = self.layout.content_len();
        if total == 0 {
            return Indicator::Empty;
        }
        match self.layout.mapper().region(self.current) {
            Region::FrontMatter(_) => Indicator::TableOfContents,
            Region::Content(index) => Indicator::Page {
                number: index + 1,
                total,
            },
            Region::BackMatter(_) => Indicator::Finished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutOptions;

    fn layout(pages: usize) -> BookLayout {
        BookLayout::new(pages, 0, LayoutOptions::default()).unwrap()
    }

    #[test]
    fn test_next_and_prev_clamp() {
        let mut nav = Navigator::new(layout(2));
        assert!(!nav.can_go_prev());
        assert_eq!(nav.prev(), 0);
        assert_eq!(nav.next(), 1);
        assert_eq!(nav.next(), 2);
        assert_eq!(nav.next(), 3);
        assert_eq!(nav.next(), 3);
        assert!(!nav.can_go_next());
    }

    #[test]
    fn test_indicator() {
        let mut nav = Navigator::new(layout(2));
        assert_eq!(nav.indicator(), Indicator::TableOfContents);
        nav.next();
        assert_eq!(nav.indicator(), Indicator::Page { number: 1, total: 2 });
        nav.next();
        nav.next();
        assert_eq!(nav.indicator(), Indicator::Finished);

        assert_eq!(Navigator::new(layout(0)).indicator(), Indicator::Empty);
    }

    #[test]
    fn test_toc_entry_jumps_through_mapper() {
        let options = LayoutOptions {
            cover: true,
            ..LayoutOptions::default()
        };
        let mut nav = Navigator::new(BookLayout::new(3, 1, options).unwrap());
        let entry = TocEntry::new("Ch1", 2);
        assert_eq!(nav.open_toc_entry(&entry), Ok(4));
        assert_eq!(nav.current_slot(), Some(PageSlot::Content { index: 2 }));
        assert_eq!(nav.go_to_toc(), 1);
    }

    #[test]
    fn test_jump_to_missing_page_is_rejected() {
        let mut nav = Navigator::new(layout(1));
        assert!(nav.go_to_content(1).is_err());
        assert_eq!(nav.current(), 0);
    }

    #[test]
    fn test_swipe() {
        let mut nav = Navigator::new(layout(3));
        assert_eq!(nav.swipe(-5.0), 0);
        assert_eq!(nav.swipe(-25.0), 1);
        assert_eq!(nav.swipe(-40.0), 2);
        assert_eq!(nav.swipe(30.0), 1);
        assert_eq!(nav.swipe(20.0), 1);
    }

    #[test]
    fn test_relayout_after_delete_clamps() {
        let mut nav = Navigator::at(layout(3), 4);
        assert_eq!(nav.indicator(), Indicator::Finished);
        nav.relayout(layout(1));
        assert_eq!(nav.current(), 2);
        nav.relayout(layout(0));
        assert_eq!(nav.current(), 1);
        assert_eq!(nav.indicator(), Indicator::Empty);
    }
}
