//! Handlers for `/comments`.

use crate::api::{validate_body, validate_label, with_connection, ApiError};
use crate::AppState;
use axum::extract::{Extension, Json, Path};
use quill_content::{create_comment, get_comment, CreateCommentParams};
use quill_types::Comment;
use std::sync::Arc;

/// POST /comments
pub async fn create_comment_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<CreateCommentParams>,
) -> Result<Json<Comment>, ApiError> {
    validate_label("title", &payload.title)?;
    validate_body(&payload.body)?;

    let comment =
        with_connection(&state.pool, move |conn| Ok(create_comment(conn, &payload)?)).await?;

    tracing::info!(
        comment_id = comment.id,
        article_id = comment.article_id,
        user_id = comment.user_id,
        "comment created"
    );
    Ok(Json(comment))
}

/// GET /comments/:commentId
pub async fn get_comment_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(comment_id): Path<i64>,
) -> Result<Json<Comment>, ApiError> {
    let comment =
        with_connection(&state.pool, move |conn| Ok(get_comment(conn, comment_id)?)).await?;
    Ok(Json(comment))
}
