//! Request handlers

mod blobs;
mod books;
mod pages;
mod session;
mod upload;

pub use blobs::*;
pub use books::*;
pub use pages::*;
pub use session::*;

use axum::Json;
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
