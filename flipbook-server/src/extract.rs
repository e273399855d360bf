//! Request extractors

use crate::error::ApiError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use flipbook_core::UserId;

/// Header carrying the mock account's email
pub const USER_HEADER: &str = "x-user-email";

/// The user a request acts for. There is no authentication: whoever sends
/// the header is that user.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_HEADER)
            .ok_or_else(|| ApiError::unauthorized(format!("missing {USER_HEADER} header")))?;
        let email = header
            .to_str()
            .map_err(|_| ApiError::unauthorized(format!("{USER_HEADER} is not valid text")))?;
        let user = UserId::parse(email).map_err(|e| ApiError::unauthorized(e.to_string()))?;
        Ok(CurrentUser(user))
    }
}
