//! Page image download

use crate::error::{ApiError, ApiResult};
use crate::extract::CurrentUser;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use flipbook_core::{BlobId, PageImage};
use serde::Serialize;

/// Body returned when a referenced image is gone. The viewer renders a
/// placeholder for that page and keeps going.
#[derive(Debug, Serialize)]
pub struct MissingImage {
    pub error: &'static str,
    pub placeholder: bool,
}

/// Serve a page image. Only blobs referenced by one of the user's books are
/// served.
pub async fn get_blob(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(blob): Path<String>,
) -> ApiResult<Response> {
    let blob: BlobId = blob
        .parse()
        .map_err(|_| ApiError::bad_request(format!("invalid blob id: {blob}")))?;

    let books = state.library.list_books(&user).await?;
    let mime_type = books
        .iter()
        .flat_map(|book| book.pages.iter())
        .find(|page| page.image.blob == blob)
        .map(|page| page.image.mime_type.clone())
        .ok_or_else(|| ApiError::not_found(format!("image {blob}")))?;

    let response = match state.library.page_image(blob).await? {
        PageImage::Loaded(data) => (
            [
                (header::CONTENT_TYPE, mime_type),
                (
                    header::CACHE_CONTROL,
                    "private, max-age=31536000, immutable".to_string(),
                ),
                // SVG pages opened directly must not run script on this origin
                (header::X_CONTENT_TYPE_OPTIONS, "nosniff".to_string()),
                (header::CONTENT_SECURITY_POLICY, "sandbox".to_string()),
            ],
            data,
        )
            .into_response(),
        PageImage::Missing => (
            StatusCode::NOT_FOUND,
            Json(MissingImage {
                error: "page image is missing",
                placeholder: true,
            }),
        )
            .into_response(),
    };
    Ok(response)
}
