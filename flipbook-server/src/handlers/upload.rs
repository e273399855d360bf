//! Multipart upload parsing shared by book creation and page appends

use crate::error::{ApiError, ApiResult};
use axum_extra::extract::Multipart;
use flipbook_core::ingest::UploadedFile;

/// Fields of an upload form: `title`, repeated `file`, repeated `caption`
#[derive(Debug, Default)]
pub(crate) struct UploadForm {
    pub title: Option<String>,
    pub files: Vec<UploadedFile>,
    pub captions: Vec<String>,
}

pub(crate) async fn read_upload_form(mut multipart: Multipart) -> ApiResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "title" => {
                let title = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(e.to_string()))?;
                form.title = Some(title);
            }
            "caption" => {
                let caption = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(e.to_string()))?;
                form.captions.push(caption);
            }
            "file" => {
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("upload-{}", form.files.len() + 1));
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(e.to_string()))?;
                form.files.push(UploadedFile::new(filename, data.to_vec()));
            }
            other => tracing::debug!(field = other, "ignoring unknown multipart field"),
        }
    }

    if form.files.is_empty() {
        return Err(ApiError::bad_request("No file provided"));
    }
    Ok(form)
}
