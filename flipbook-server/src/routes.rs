//! API routes

use crate::config::CorsOrigins;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

const LOCAL_DEV_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let allow_origin = match origins {
        CorsOrigins::Any => AllowOrigin::any(),
        CorsOrigins::List(list) => AllowOrigin::list(
            list.iter()
                .filter_map(|s| HeaderValue::from_str(s).ok()),
        ),
        CorsOrigins::LocalDev => {
            AllowOrigin::list(LOCAL_DEV_ORIGINS.into_iter().map(HeaderValue::from_static))
        }
    };
    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    let api_routes = Router::new()
        // Mock login
        .route("/session", post(handlers::create_session))
        // Books
        .route(
            "/books",
            get(handlers::list_books).post(handlers::create_book),
        )
        .route(
            "/books/:id",
            get(handlers::get_book)
                .patch(handlers::rename_book)
                .delete(handlers::delete_book),
        )
        .route("/books/:id/view", get(handlers::view_page))
        // Pages
        .route("/books/:id/pages", post(handlers::append_pages))
        .route(
            "/books/:id/pages/:index",
            axum::routing::delete(handlers::delete_page),
        )
        .route("/books/:id/pages/:index/caption", put(handlers::set_caption))
        // Images
        .route("/blobs/:blob", get(handlers::get_blob));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(handlers::health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(body_limit),
        )
        .with_state(state)
}
