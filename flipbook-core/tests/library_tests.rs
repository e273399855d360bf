//! Library service tests
//!
//! These drive the same operations the viewer and the title editor perform,
//! against in-memory stores, and check that failures never leave partial
//! state behind.

use async_trait::async_trait;
use flipbook_core::ingest::{FileIngestor, IngestedImage, Ingestor, UploadedFile};
use flipbook_core::storage::{
    BlobStore, BookStore, JsonBookStore, MemoryStorage, ProviderBlobStore, StorageProvider,
    StorageResult,
};
use flipbook_core::{
    BlobId, Book, BookDraft, FlipbookError, Indicator, InputError, Library, PageImage, PageSlot,
    StorageError, TocEntry, UserId,
};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// =============================================================================
// Fixtures
// =============================================================================

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([10, 20, 30])));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

fn uploads(count: usize) -> Vec<UploadedFile> {
    (0..count)
        .map(|i| UploadedFile::new(format!("page-{i}.png"), png(i as u32 + 1, 2)))
        .collect()
}

fn user() -> UserId {
    UserId::parse("reader@example.com").unwrap()
}

struct Fixture {
    storage: Arc<MemoryStorage>,
    library: Library,
}

impl Fixture {
    fn new() -> Self {
        let storage = Arc::new(MemoryStorage::new());
        let library = Library::new(
            Arc::new(ProviderBlobStore::new(storage.clone())),
            Arc::new(JsonBookStore::new(storage.clone())),
            Arc::new(FileIngestor::new()),
        );
        Self { storage, library }
    }

    async fn blob_count(&self) -> usize {
        self.storage.list("blobs/").await.unwrap().len()
    }

    async fn create(&self, captions: &[&str]) -> Book {
        let draft = self
            .library
            .ingest(uploads(captions.len()))
            .await
            .unwrap()
            .with_title("Scenario")
            .with_captions(captions.iter().copied());
        self.library.create_book(&user(), draft).await.unwrap()
    }
}

/// Book store whose writes always fail
struct ReadOnlyBookStore;

#[async_trait]
impl BookStore for ReadOnlyBookStore {
    async fn load_all(&self, _user: &UserId) -> StorageResult<Vec<Book>> {
        Ok(Vec::new())
    }

    async fn save_all(&self, _user: &UserId, _books: &[Book]) -> StorageResult<()> {
        Err(StorageError::BackendError("disk full".to_string()))
    }
}

/// Ingestor that crashes on every call
struct CrashingIngestor;

impl Ingestor for CrashingIngestor {
    fn ingest(&self, _files: &[UploadedFile]) -> Result<Vec<IngestedImage>, InputError> {
        panic!("decoder bug");
    }
}

/// Blob store that starts failing after a number of successful puts
struct FlakyBlobStore {
    inner: ProviderBlobStore,
    remaining: AtomicUsize,
}

#[async_trait]
impl BlobStore for FlakyBlobStore {
    async fn put(&self, content: Vec<u8>) -> StorageResult<BlobId> {
        let left = self.remaining.load(Ordering::SeqCst);
        if left == 0 {
            return Err(StorageError::BackendError("quota exceeded".to_string()));
        }
        self.remaining.store(left - 1, Ordering::SeqCst);
        self.inner.put(content).await
    }

    async fn get(&self, id: BlobId) -> StorageResult<Option<Vec<u8>>> {
        self.inner.get(id).await
    }

    async fn delete(&self, id: BlobId) -> StorageResult<()> {
        self.inner.delete(id).await
    }
}

// =============================================================================
// Creation
// =============================================================================

#[tokio::test]
async fn test_two_uploads_become_two_uncaptioned_pages() {
    let fx = Fixture::new();
    let draft = fx.library.ingest(uploads(2)).await.unwrap();

    assert_eq!(draft.pages.len(), 2);
    assert_eq!(draft.pages[0].image.source, "page-0.png");
    assert_eq!(draft.pages[1].image.source, "page-1.png");
    assert!(draft.pages.iter().all(|p| p.caption.is_empty()));

    let book = fx
        .library
        .create_book(&user(), draft.with_title("Album"))
        .await
        .unwrap();
    assert_eq!(book.len(), 2);
    assert_eq!(book.pages[0].image.width, Some(1));
    assert_eq!(book.pages[1].image.width, Some(2));
    assert!(book.toc().is_empty());
    assert_eq!(fx.blob_count().await, 2);
}

#[tokio::test]
async fn test_missing_title_commits_nothing() {
    let fx = Fixture::new();
    let draft = fx.library.ingest(uploads(2)).await.unwrap();

    let err = fx.library.create_book(&user(), draft).await.unwrap_err();
    assert!(matches!(err, FlipbookError::Input(InputError::MissingTitle)));
    assert!(!err.is_retryable());

    assert!(fx.library.list_books(&user()).await.unwrap().is_empty());
    assert_eq!(fx.blob_count().await, 0);
}

#[tokio::test]
async fn test_failed_save_removes_stored_blobs() {
    let storage = Arc::new(MemoryStorage::new());
    let library = Library::new(
        Arc::new(ProviderBlobStore::new(storage.clone())),
        Arc::new(ReadOnlyBookStore),
        Arc::new(FileIngestor::new()),
    );

    let draft = library.ingest(uploads(3)).await.unwrap().with_title("Lost");
    let err = library.create_book(&user(), draft).await.unwrap_err();

    assert!(err.is_retryable());
    assert!(storage.list("blobs/").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_blob_put_rolls_back_earlier_puts() {
    let storage = Arc::new(MemoryStorage::new());
    let library = Library::new(
        Arc::new(FlakyBlobStore {
            inner: ProviderBlobStore::new(storage.clone()),
            remaining: AtomicUsize::new(2),
        }),
        Arc::new(JsonBookStore::new(storage.clone())),
        Arc::new(FileIngestor::new()),
    );

    let draft = library.ingest(uploads(3)).await.unwrap().with_title("Partial");
    let err = library.create_book(&user(), draft).await.unwrap_err();

    assert!(matches!(err, FlipbookError::Storage(_)));
    assert!(storage.list("blobs/").await.unwrap().is_empty());
    assert!(library.list_books(&user()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unreadable_upload_is_input_error() {
    let fx = Fixture::new();
    let files = vec![UploadedFile::new("notes.txt", b"just text".to_vec())];
    let err = fx.library.ingest(files).await.unwrap_err();
    assert!(matches!(err, FlipbookError::Input(_)));
}

#[tokio::test]
async fn test_crashed_decoder_is_not_retryable() {
    let library = Library::new(
        Arc::new(ProviderBlobStore::new(Arc::new(MemoryStorage::new()))),
        Arc::new(ReadOnlyBookStore),
        Arc::new(CrashingIngestor),
    );

    let err = library.ingest(uploads(1)).await.unwrap_err();

    assert!(matches!(
        err,
        FlipbookError::Input(InputError::UnreadableFile { .. })
    ));
    assert!(!err.is_retryable());
}

// =============================================================================
// Editing
// =============================================================================

#[tokio::test]
async fn test_delete_page_scenario() {
    let fx = Fixture::new();
    let book = fx.create(&["Intro", "", "Ch1"]).await;
    assert_eq!(
        book.toc(),
        vec![TocEntry::new("Intro", 0), TocEntry::new("Ch1", 2)]
    );
    let deleted_blob = book.pages[1].image.blob;

    let book = fx.library.delete_page(&user(), book.id, 1).await.unwrap();

    assert_eq!(book.len(), 2);
    assert_eq!(book.pages[0].caption, "Intro");
    assert_eq!(book.pages[1].caption, "Ch1");
    assert_eq!(
        book.toc(),
        vec![TocEntry::new("Intro", 0), TocEntry::new("Ch1", 1)]
    );
    assert_eq!(
        fx.library.page_image(deleted_blob).await.unwrap(),
        PageImage::Missing
    );

    let reloaded = fx.library.get_book(&user(), book.id).await.unwrap();
    assert_eq!(reloaded.pages, book.pages);
}

#[tokio::test]
async fn test_caption_and_title_edits_persist() {
    let fx = Fixture::new();
    let book = fx.create(&["", ""]).await;

    fx.library
        .set_caption(&user(), book.id, 1, "Finale")
        .await
        .unwrap();
    let book = fx
        .library
        .rename_book(&user(), book.id, "  Renamed ")
        .await
        .unwrap();

    assert_eq!(book.title, "Renamed");
    assert_eq!(book.toc(), vec![TocEntry::new("Finale", 1)]);

    let err = fx
        .library
        .rename_book(&user(), book.id, " ")
        .await
        .unwrap_err();
    assert!(matches!(err, FlipbookError::Input(InputError::MissingTitle)));
    assert_eq!(
        fx.library.get_book(&user(), book.id).await.unwrap().title,
        "Renamed"
    );
}

#[tokio::test]
async fn test_out_of_range_page_is_rejected() {
    let fx = Fixture::new();
    let book = fx.create(&["A"]).await;

    let err = fx.library.delete_page(&user(), book.id, 5).await.unwrap_err();
    assert!(matches!(err, FlipbookError::Layout(_)));
    assert_eq!(fx.library.get_book(&user(), book.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_append_pages_keeps_order() {
    let fx = Fixture::new();
    let book = fx.create(&["First"]).await;

    let draft = fx.library.ingest(uploads(2)).await.unwrap();
    let book = fx
        .library
        .append_pages(&user(), book.id, draft.pages)
        .await
        .unwrap();

    assert_eq!(book.len(), 3);
    assert_eq!(book.pages[0].caption, "First");
    assert_eq!(
        book.pages[2].image.original_filename.as_deref(),
        Some("page-1.png")
    );
    assert_eq!(fx.blob_count().await, 3);
}

#[tokio::test]
async fn test_delete_book_removes_blobs() {
    let fx = Fixture::new();
    let keep = fx.create(&["Keep"]).await;
    let drop = fx.create(&["Drop", "Me"]).await;
    assert_eq!(fx.blob_count().await, 3);

    fx.library.delete_book(&user(), drop.id).await.unwrap();

    let books = fx.library.list_books(&user()).await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, keep.id);
    assert_eq!(fx.blob_count().await, 1);

    let err = fx.library.delete_book(&user(), drop.id).await.unwrap_err();
    assert!(matches!(err, FlipbookError::NotFound(_)));
}

#[tokio::test]
async fn test_books_are_partitioned_by_user() {
    let fx = Fixture::new();
    let book = fx.create(&["Mine"]).await;
    let other = UserId::parse("someone@else.org").unwrap();

    assert!(fx.library.list_books(&other).await.unwrap().is_empty());
    assert!(matches!(
        fx.library.get_book(&other, book.id).await,
        Err(FlipbookError::NotFound(_))
    ));
}

// =============================================================================
// Viewing
// =============================================================================

#[tokio::test]
async fn test_page_image_loads_stored_bytes() {
    let fx = Fixture::new();
    let book = fx.create(&[""]).await;

    match fx.library.page_image(book.pages[0].image.blob).await.unwrap() {
        PageImage::Loaded(bytes) => assert_eq!(bytes, png(1, 2)),
        PageImage::Missing => panic!("blob should exist"),
    }
}

#[tokio::test]
async fn test_toc_navigation_uses_layout() {
    let fx = Fixture::new();
    let book = fx.create(&["Intro", "", "Ch1"]).await;
    let layout = fx.library.layout(&book).unwrap();

    let targets = layout.toc_targets(&book.toc()).unwrap();
    assert_eq!(targets[1].physical_page, 3);

    let mut nav = fx.library.navigator(&book, 0).unwrap();
    assert_eq!(nav.indicator(), Indicator::TableOfContents);
    nav.open_toc_entry(&targets[1].entry).unwrap();
    assert_eq!(nav.current_slot(), Some(PageSlot::Content { index: 2 }));
    assert_eq!(nav.indicator(), Indicator::Page { number: 3, total: 3 });

    let book = fx.library.delete_page(&user(), book.id, 2).await.unwrap();
    nav.relayout(fx.library.layout(&book).unwrap());
    assert_eq!(nav.indicator(), Indicator::Finished);
}

#[tokio::test]
async fn test_empty_draft_is_rejected() {
    let fx = Fixture::new();
    let err = fx
        .library
        .create_book(&user(), BookDraft::default().with_title("Nothing"))
        .await
        .unwrap_err();
    assert!(matches!(err, FlipbookError::Input(InputError::NoPages)));
}
