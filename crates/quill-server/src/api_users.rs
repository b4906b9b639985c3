//! Handlers for `/users`.

use crate::api::{validate_label, with_connection, ApiError};
use crate::AppState;
use axum::extract::{Extension, Json, Path};
use quill_content::{create_user, get_user, CreateUserParams};
use quill_types::User;
use std::sync::Arc;

/// POST /users
pub async fn create_user_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<CreateUserParams>,
) -> Result<Json<User>, ApiError> {
    validate_label("name", &payload.name)?;

    let user = with_connection(&state.pool, move |conn| Ok(create_user(conn, &payload)?)).await?;

    tracing::info!(user_id = user.id, "user created");
    Ok(Json(user))
}

/// GET /users/:userId
pub async fn get_user_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<User>, ApiError> {
    let user = with_connection(&state.pool, move |conn| Ok(get_user(conn, user_id)?)).await?;
    Ok(Json(user))
}
