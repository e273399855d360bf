//! Flipbook Core Library
//!
//! This crate provides the types and logic behind the Flipbook creator: books
//! of captioned page images, the mapping between content pages and the
//! physical pages of a page-turning display, upload ingestion, and the
//! storage seams that books and images are persisted through.

pub mod draft;
pub mod error;
pub mod ingest;
pub mod layout;
pub mod library;
pub mod storage;
pub mod types;

pub use draft::{BookDraft, DraftPage};
pub use error::{FlipbookError, InputError, LayoutError, Result, StorageError};
pub use layout::{BookLayout, Indicator, LayoutOptions, Navigator, PageMapper, PageSlot, TocTarget};
pub use library::{Library, PageImage};
pub use types::{BlobId, Book, ImageRef, Page, TocEntry, UserId};
