use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::openapi_catalog::OpenApiSource;
use crate::search_service::CatalogClient;

pub mod handlers;
pub mod models;
pub mod views;

/// Multipart uploads carry whole PDF files.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub client: CatalogClient,
    pub open_apis: Arc<dyn OpenApiSource>,
    pub static_dir: PathBuf,
}

pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let assets = ServeDir::new(&state.static_dir);

    Router::new()
        // API routes
        .route("/api/search", get(handlers::search_handler))
        .route("/api/filters", get(handlers::filters_handler))
        .route("/api/articles", post(handlers::create_handler))
        .route(
            "/api/articles/:id",
            get(handlers::detail_handler).patch(handlers::update_handler),
        )
        .route("/api/articles/:id/edit-form", get(handlers::edit_form_handler))
        .route(
            "/api/articles/:id/edit-request",
            post(handlers::edit_request_handler),
        )
        .route(
            "/api/articles/:id/delete-request",
            post(handlers::delete_request_handler),
        )
        .route("/api/files/:id/download", get(handlers::download_handler))
        .route("/api/openapi/:id", get(handlers::openapi_detail_handler))
        // Page routes share one shell, unknown paths go home
        .fallback(handlers::page_handler)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
        // Static assets for the shell
        .nest_service("/static", assets)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
