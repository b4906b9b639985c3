//! Handlers for `/articles`.

use crate::api::{validate_body, validate_label, with_connection, ApiError};
use crate::AppState;
use axum::extract::{Extension, Json, Path};
use quill_content::{create_article, get_article, list_comments_for_article, CreateArticleParams};
use quill_types::{Article, Comment};
use std::sync::Arc;

/// POST /articles
///
/// The author must already exist; an unknown `author_id` is a 400.
pub async fn create_article_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<CreateArticleParams>,
) -> Result<Json<Article>, ApiError> {
    validate_label("title", &payload.title)?;
    validate_body(&payload.body)?;

    let article =
        with_connection(&state.pool, move |conn| Ok(create_article(conn, &payload)?)).await?;

    tracing::info!(
        article_id = article.id,
        author_id = article.author_id,
        "article created"
    );
    Ok(Json(article))
}

/// GET /articles/:articleId
pub async fn get_article_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(article_id): Path<i64>,
) -> Result<Json<Article>, ApiError> {
    let article =
        with_connection(&state.pool, move |conn| Ok(get_article(conn, article_id)?)).await?;
    Ok(Json(article))
}

/// GET /articles/:articleId/comments
pub async fn list_article_comments_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(article_id): Path<i64>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let comments = with_connection(&state.pool, move |conn| {
        Ok(list_comments_for_article(conn, article_id)?)
    })
    .await?;
    Ok(Json(comments))
}
