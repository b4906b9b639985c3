//! Quill server library logic.

pub mod api;
pub mod api_articles;
pub mod api_comments;
pub mod api_search;
pub mod api_users;
pub mod config;

use api_search::SearchSettings;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Json, Router,
};
use quill_db::DbPool;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool. Handlers borrow one connection per request.
    pub pool: DbPool,
    /// Search deadline and input limits.
    pub search: SearchSettings,
}

/// Maximum request body size (2 MiB). Article bodies are capped at 1 MiB,
/// leaving room for JSON escaping.
const MAX_REQUEST_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/users", post(api_users::create_user_handler))
        .route("/users/{userId}", get(api_users::get_user_handler))
        .route("/articles", post(api_articles::create_article_handler))
        .route(
            "/articles/{articleId}",
            get(api_articles::get_article_handler),
        )
        .route(
            "/articles/{articleId}/comments",
            get(api_articles::list_article_comments_handler),
        )
        .route("/comments", post(api_comments::create_comment_handler))
        .route(
            "/comments/{commentId}",
            get(api_comments::get_comment_handler),
        )
        .route("/find_string", get(api_search::find_string_handler))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(Arc::new(state)))
}
