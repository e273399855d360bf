//! Mock login

use crate::error::{ApiError, ApiResult};
use crate::extract::USER_HEADER;
use axum::Json;
use flipbook_core::UserId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// Normalized email to send back on every request
    pub email: String,

    /// Header the email goes in
    pub header: &'static str,
}

/// "Log in": validate and normalize an email. No credentials are involved.
pub async fn create_session(Json(request): Json<SessionRequest>) -> ApiResult<Json<SessionResponse>> {
    let user = UserId::parse(&request.email).map_err(|e| ApiError::bad_request(e.to_string()))?;
    tracing::debug!(user = %user, "session started");
    Ok(Json(SessionResponse {
        email: user.email().to_string(),
        header: USER_HEADER,
    }))
}
