//! upload-api - HTTP layer for the upload page
//!
//! Serves the upload page (plus the browser module under `/pkg`) and accepts
//! single-file multipart uploads on `POST /upload`. Failures are answered with a JSON body carrying a
//! `detail` message, which is what the upload form displays.
//!
//! # Usage
//!
//! ```ignore
//! use upload_api::{create_router, AppState, ServerConfig};
//!
//! let state = AppState::new(ServerConfig::default());
//! let router = create_router(state);
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use state::AppState;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Room for multipart boundaries and part headers on top of the file itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Create the upload router with the given application state
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state
        .config()
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD);

    let assets = ServeDir::new(&state.config().assets_dir);

    Router::new()
        // Upload page and its browser module
        .route("/", get(handlers::page::index))
        .nest_service("/pkg", assets)
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Single-file upload
        .route("/upload", post(handlers::upload::upload_file))
        // Middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
