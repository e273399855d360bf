//! Mapping library errors onto HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use flipbook_core::FlipbookError;
use serde::Serialize;

/// Error body returned by every API route
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub retryable: bool,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub retryable: bool,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }
}

impl From<FlipbookError> for ApiError {
    fn from(err: FlipbookError) -> Self {
        let status = match &err {
            FlipbookError::Input(_) | FlipbookError::Layout(_) => StatusCode::BAD_REQUEST,
            FlipbookError::NotFound(_) => StatusCode::NOT_FOUND,
            FlipbookError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        if status == StatusCode::SERVICE_UNAVAILABLE {
            tracing::error!(error = %err, "storage failure");
            // Details stay in the log; clients only learn that a retry may help
            return Self {
                status,
                message: "Storage is unavailable, please try again".to_string(),
                retryable: true,
            };
        }
        Self {
            status,
            message: err.to_string(),
            retryable: err.is_retryable(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            retryable: self.retryable,
        };
        (self.status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use flipbook_core::{InputError, StorageError};

    #[test]
    fn test_status_mapping() {
        let input: ApiError = FlipbookError::from(InputError::MissingTitle).into();
        assert_eq!(input.status, StatusCode::BAD_REQUEST);
        assert!(!input.retryable);

        let missing: ApiError = FlipbookError::NotFound("book".into()).into();
        assert_eq!(missing.status, StatusCode::NOT_FOUND);

        let storage: ApiError =
            FlipbookError::from(StorageError::BackendError("disk".into())).into();
        assert_eq!(storage.status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(storage.retryable);
        assert!(!storage.message.contains("disk"));
    }
}
