//! Library service: every book operation a user can perform
//!
//! Each mutation loads the user's whole book list, applies the change in
//! memory and writes the list back once. Concurrent writers for the same user
//! are last-writer-wins.

use crate::draft::{BookDraft, DraftPage};
use crate::error::{FlipbookError, InputError, Result};
use crate::ingest::{Ingestor, UploadedFile};
use crate::layout::{BookLayout, LayoutOptions, Navigator};
use crate::storage::{BlobStore, BookStore};
use crate::types::{BlobId, Book, ImageRef, Page, UserId};
use std::sync::Arc;
use uuid::Uuid;

/// Result of loading a page image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageImage {
    Loaded(Vec<u8>),
    /// The blob is gone; viewers show a placeholder for this page only
    Missing,
}

/// Book operations over injected stores
#[derive(Clone)]
pub struct Library {
    blobs: Arc<dyn BlobStore>,
    books: Arc<dyn BookStore>,
    ingestor: Arc<dyn Ingestor>,
    layout: LayoutOptions,
}

impl Library {
    pub fn new(
        blobs: Arc<dyn BlobStore>,
        books: Arc<dyn BookStore>,
        ingestor: Arc<dyn Ingestor>,
    ) -> Self {
        Self {
            blobs,
            books,
            ingestor,
            layout: LayoutOptions::default(),
        }
    }

    /// Use non-default front and back matter
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    pub fn layout_options(&self) -> LayoutOptions {
        self.layout
    }

    /// Decode uploads into an untitled draft. Nothing is persisted.
    pub async fn ingest(&self, files: Vec<UploadedFile>) -> Result<BookDraft> {
        let ingestor = Arc::clone(&self.ingestor);
        let images = tokio::task::spawn_blocking(move || ingestor.ingest(&files))
            .await
            .map_err(|e| InputError::unreadable("upload", format!("decoding failed: {e}")))??;
        Ok(BookDraft::from_images(images))
    }

    pub async fn list_books(&self, user: &UserId) -> Result<Vec<Book>> {
        Ok(self.books.load_all(user).await?)
    }

    pub async fn get_book(&self, user: &UserId, id: Uuid) -> Result<Book> {
        self.books
            .load_all(user)
            .await?
            .into_iter()
            .find(|b| b.id == id)
            .ok_or_else(|| not_found(id))
    }

    /// Persist a confirmed draft as a new book
    pub async fn create_book(&self, user: &UserId, draft: BookDraft) -> Result<Book> {
        draft.validate()?;
        let mut book = Book::new(&draft.title)?;
        let mut books = self.books.load_all(user).await?;

        book.pages = self.store_pages(draft.pages).await?;
        books.push(book.clone());

        if let Err(e) = self.books.save_all(user, &books).await {
            let stored: Vec<BlobId> = book.blob_ids().collect();
            self.discard_blobs(&stored).await;
            return Err(e.into());
        }

        tracing::info!(user = %user, book = %book.id, pages = book.len(), "created book");
        Ok(book)
    }

    pub async fn rename_book(&self, user: &UserId, id: Uuid, title: &str) -> Result<Book> {
        self.update(user, id, |book| Ok(book.set_title(title)?))
            .await
    }

    pub async fn set_caption(
        &self,
        user: &UserId,
        id: Uuid,
        index: usize,
        caption: &str,
    ) -> Result<Book> {
        self.update(user, id, |book| Ok(book.set_caption(index, caption)?))
            .await
    }

    /// Append pages to the end of an existing book
    pub async fn append_pages(
        &self,
        user: &UserId,
        id: Uuid,
        drafts: Vec<DraftPage>,
    ) -> Result<Book> {
        if drafts.is_empty() {
            return Err(InputError::NoPages.into());
        }
        let mut books = self.books.load_all(user).await?;
        let position = books
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| not_found(id))?;

        let pages = self.store_pages(drafts).await?;
        let stored: Vec<BlobId> = pages.iter().map(|p| p.image.blob).collect();
        books[position].append_pages(pages);

        if let Err(e) = self.books.save_all(user, &books).await {
            self.discard_blobs(&stored).await;
            return Err(e.into());
        }
        tracing::info!(user = %user, book = %id, added = stored.len(), "appended pages");
        Ok(books.swap_remove(position))
    }

    /// Remove one page; later pages shift down by one
    pub async fn delete_page(&self, user: &UserId, id: Uuid, index: usize) -> Result<Book> {
        let mut removed = None;
        let book = self
            .update(user, id, |book| {
                removed = Some(book.remove_page(index)?);
                Ok(())
            })
            .await?;

        if let Some(page) = removed {
            self.discard_blobs(&[page.image.blob]).await;
        }
        Ok(book)
    }

    pub async fn delete_book(&self, user: &UserId, id: Uuid) -> Result<()> {
        let mut books = self.books.load_all(user).await?;
        let position = books
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| not_found(id))?;
        let book = books.remove(position);

        self.books.save_all(user, &books).await?;

        let blobs: Vec<BlobId> = book.blob_ids().collect();
        self.discard_blobs(&blobs).await;
        tracing::info!(user = %user, book = %id, "deleted book");
        Ok(())
    }

    /// Load a page image; an absent blob is a placeholder, not an error
    pub async fn page_image(&self, blob: BlobId) -> Result<PageImage> {
        Ok(match self.blobs.get(blob).await? {
            Some(data) => PageImage::Loaded(data),
            None => {
                tracing::warn!(blob = %blob, "page image missing");
                PageImage::Missing
            }
        })
    }

    pub fn layout(&self, book: &Book) -> Result<BookLayout> {
        Ok(BookLayout::for_book(book, self.layout)?)
    }

    /// A navigator opened at `physical`, clamped to the book
    pub fn navigator(&self, book: &Book, physical: usize) -> Result<Navigator> {
        Ok(Navigator::at(self.layout(book)?, physical))
    }

    async fn update<F>(&self, user: &UserId, id: Uuid, apply: F) -> Result<Book>
    where
        F: FnOnce(&mut Book) -> Result<()>,
    {
        let mut books = self.books.load_all(user).await?;
        let book = books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| not_found(id))?;
        apply(book)?;
        let updated = book.clone();

        self.books.save_all(user, &books).await?;
        Ok(updated)
    }

    /// Put every draft image; on failure, remove what this call stored
    async fn store_pages(&self, drafts: Vec<DraftPage>) -> Result<Vec<Page>> {
        let mut pages = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let image = draft.image;
            let blob = match self.blobs.put(image.data).await {
                Ok(blob) => blob,
                Err(e) => {
                    let stored: Vec<BlobId> = pages.iter().map(|p: &Page| p.image.blob).collect();
                    self.discard_blobs(&stored).await;
                    return Err(e.into());
                }
            };

            let mut image_ref = ImageRef::new(blob, image.mime_type).with_filename(image.source);
            if let (Some(width), Some(height)) = (image.width, image.height) {
                image_ref = image_ref.with_dimensions(width, height);
            }
            pages.push(Page::new(image_ref).with_caption(draft.caption.trim()));
        }
        Ok(pages)
    }

    /// Best-effort removal of blobs that are no longer referenced
    async fn discard_blobs(&self, blobs: &[BlobId]) {
        for blob in blobs {
            if let Err(e) = self.blobs.delete(*blob).await {
                tracing::warn!(blob = %blob, error = %e, "failed to delete blob");
            }
        }
    }
}

fn not_found(id: Uuid) -> FlipbookError {
    FlipbookError::NotFound(format!("book {id}"))
}
