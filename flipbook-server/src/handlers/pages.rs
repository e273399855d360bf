//! Page editing handlers

use super::books::{parse_book_id, parse_page_index, BookResponse};
use super::upload::read_upload_form;
use crate::error::ApiResult;
use crate::extract::CurrentUser;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::Multipart;
use serde::Deserialize;

/// Append uploaded files to the end of a book
pub async fn append_pages(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    multipart: Multipart,
) -> ApiResult<Json<BookResponse>> {
    let id = parse_book_id(&id)?;
    let form = read_upload_form(multipart).await?;

    // Fail fast on a missing book before decoding anything
    state.library.get_book(&user, id).await?;

    let draft = state
        .library
        .ingest(form.files)
        .await?
        .with_captions(&form.captions);
    let book = state.library.append_pages(&user, id, draft.pages).await?;
    Ok(Json(BookResponse::build(&state.library, book)?))
}

#[derive(Debug, Deserialize)]
pub struct CaptionRequest {
    /// Empty or whitespace removes the page from the table of contents
    #[serde(default)]
    pub caption: String,
}

pub async fn set_caption(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((id, index)): Path<(String, String)>,
    Json(request): Json<CaptionRequest>,
) -> ApiResult<Json<BookResponse>> {
    let id = parse_book_id(&id)?;
    let index = parse_page_index(&index)?;
    let book = state
        .library
        .set_caption(&user, id, index, &request.caption)
        .await?;
    Ok(Json(BookResponse::build(&state.library, book)?))
}

/// Remove one page; later pages shift down
pub async fn delete_page(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((id, index)): Path<(String, String)>,
) -> ApiResult<Json<BookResponse>> {
    let id = parse_book_id(&id)?;
    let index = parse_page_index(&index)?;
    let book = state.library.delete_page(&user, id, index).await?;
    Ok(Json(BookResponse::build(&state.library, book)?))
}
