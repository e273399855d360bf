//! Core types for flipbooks: books, pages, the derived table of contents and users

mod book;
mod page;
mod toc;
mod user;

pub use book::{normalize_title, Book};
pub use page::{BlobId, ImageRef, Page};
pub use toc::{table_of_contents, TocEntry};
pub use user::UserId;
