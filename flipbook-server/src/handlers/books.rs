//! Book handlers

use super::upload::read_upload_form;
use crate::error::{ApiError, ApiResult};
use crate::extract::CurrentUser;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Multipart;
use chrono::{DateTime, Utc};
use flipbook_core::layout::BookLayout;
use flipbook_core::types::normalize_title;
use flipbook_core::{
    BlobId, Book, FlipbookError, Indicator, Library, Page, PageSlot, TocEntry, TocTarget,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Parse a book id from the path; malformed ids are a client error
pub(crate) fn parse_book_id(id: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| ApiError::bad_request(format!("invalid book id: {id}")))
}

/// Parse a page index from the path or query string
pub(crate) fn parse_page_index(index: &str) -> ApiResult<usize> {
    index
        .trim()
        .parse()
        .map_err(|_| ApiError::bad_request(format!("invalid page index: {index}")))
}

/// Book summary for list response
#[derive(Debug, Serialize)]
pub struct BookSummary {
    pub id: Uuid,
    pub title: String,
    pub page_count: usize,
    pub toc_entries: usize,
    /// First page image, for a thumbnail
    pub cover_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            page_count: book.len(),
            toc_entries: book.toc().len(),
            cover_url: book.pages.first().map(|p| blob_url(p.image.blob)),
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListBooksResponse {
    pub books: Vec<BookSummary>,
    pub total: usize,
}

/// One content page as the viewer needs it
#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub index: usize,
    pub physical_page: usize,
    pub caption: String,
    pub blob: BlobId,
    pub mime_type: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub image_url: String,
}

impl PageResponse {
    fn new(index: usize, physical_page: usize, page: &Page) -> Self {
        Self {
            index,
            physical_page,
            caption: page.caption.clone(),
            blob: page.image.blob,
            mime_type: page.image.mime_type.clone(),
            width: page.image.width,
            height: page.image.height,
            image_url: blob_url(page.image.blob),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LayoutSummary {
    pub front_matter: usize,
    pub toc_sheets: usize,
    pub total_pages: usize,
}

impl From<&BookLayout> for LayoutSummary {
    fn from(layout: &BookLayout) -> Self {
        Self {
            front_matter: layout.front_matter(),
            toc_sheets: layout.toc_sheets(),
            total_pages: layout.total_pages(),
        }
    }
}

/// Full book with resolved physical positions
#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pages: Vec<PageResponse>,
    pub toc: Vec<TocTarget>,
    pub layout: LayoutSummary,
}

impl BookResponse {
    pub(crate) fn build(library: &Library, book: Book) -> ApiResult<Self> {
        let layout = library.layout(&book)?;
        let mapper = layout.mapper();

        let pages = book
            .pages
            .iter()
            .enumerate()
            .map(|(index, page)| -> ApiResult<PageResponse> {
                let physical = mapper.to_physical(index).map_err(FlipbookError::from)?;
                Ok(PageResponse::new(index, physical, page))
            })
            .collect::<ApiResult<Vec<_>>>()?;
        let toc = layout
            .toc_targets(&book.toc())
            .map_err(FlipbookError::from)?;

        Ok(Self {
            id: book.id,
            title: book.title,
            created_at: book.created_at,
            updated_at: book.updated_at,
            pages,
            toc,
            layout: LayoutSummary::from(&layout),
        })
    }
}

fn blob_url(blob: BlobId) -> String {
    format!("/api/v1/blobs/{blob}")
}

/// List the user's books in creation order
pub async fn list_books(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<ListBooksResponse>> {
    let books = state.library.list_books(&user).await?;
    let books: Vec<BookSummary> = books.iter().map(BookSummary::from).collect();
    Ok(Json(ListBooksResponse {
        total: books.len(),
        books,
    }))
}

/// Create a book from an upload form: `title`, one or more `file`, and
/// optional positional `caption` fields
pub async fn create_book(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<BookResponse>)> {
    let form = read_upload_form(multipart).await?;

    // Reject a bad title before doing any decoding work
    let title = normalize_title(form.title.as_deref().unwrap_or_default())
        .map_err(FlipbookError::from)?;

    let draft = state
        .library
        .ingest(form.files)
        .await?
        .with_title(title)
        .with_captions(&form.captions);
    let book = state.library.create_book(&user, draft).await?;

    let response = BookResponse::build(&state.library, book)?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_book(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<BookResponse>> {
    let id = parse_book_id(&id)?;
    let book = state.library.get_book(&user, id).await?;
    Ok(Json(BookResponse::build(&state.library, book)?))
}

#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    pub title: String,
}

pub async fn rename_book(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(request): Json<RenameRequest>,
) -> ApiResult<Json<BookResponse>> {
    let id = parse_book_id(&id)?;
    let book = state.library.rename_book(&user, id, &request.title).await?;
    Ok(Json(BookResponse::build(&state.library, book)?))
}

pub async fn delete_book(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_book_id(&id)?;
    state.library.delete_book(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    /// Physical page; out-of-range values clamp to the last page
    pub page: Option<String>,
}

/// One physical page of the page-turning view
#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub physical_page: usize,
    pub total_pages: usize,
    pub slot: Option<PageSlot>,
    pub indicator: Indicator,
    pub can_go_prev: bool,
    pub can_go_next: bool,
    /// Entries on this sheet when the page is a table of contents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toc: Option<Vec<TocTarget>>,
    /// The content page shown, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageResponse>,
}

pub async fn view_page(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Query(query): Query<ViewQuery>,
) -> ApiResult<Json<ViewResponse>> {
    let id = parse_book_id(&id)?;
    let physical = query.page.as_deref().map(parse_page_index).transpose()?;
    let book = state.library.get_book(&user, id).await?;
    let navigator = state.library.navigator(&book, physical.unwrap_or_default())?;
    let layout = *navigator.layout();
    let slot = navigator.current_slot();

    let mut toc = None;
    let mut page = None;
    match slot {
        Some(PageSlot::TableOfContents { sheet }) => {
            let entries: Vec<TocEntry> = layout.toc_sheet(&book.toc(), sheet).to_vec();
            toc = Some(layout.toc_targets(&entries).map_err(FlipbookError::from)?);
        }
        Some(PageSlot::Content { index }) => {
            if let Some(content) = book.pages.get(index) {
                page = Some(PageResponse::new(index, navigator.current(), content));
            }
        }
        Some(PageSlot::Cover) | Some(PageSlot::BackCover) | None => {}
    }

    Ok(Json(ViewResponse {
        physical_page: navigator.current(),
        total_pages: layout.total_pages(),
        slot,
        indicator: navigator.indicator(),
        can_go_prev: navigator.can_go_prev(),
        can_go_next: navigator.can_go_next(),
        toc,
        page,
    }))
}
