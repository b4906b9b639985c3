//! Shared API plumbing: the error type and the blocking database helper.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quill_content::ContentError;
use quill_db::DbPool;
use quill_search::SearchError;
use rusqlite::Connection;
use thiserror::Error;

/// Maximum length for names and titles, in bytes.
pub(crate) const MAX_LABEL_LEN: usize = 256;
/// Maximum length for article and comment bodies, in bytes.
pub(crate) const MAX_BODY_LEN: usize = 1024 * 1024;

/// API error type mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    /// The database could not be reached or was too busy to answer.
    #[error("data unavailable: {0}")]
    DataUnavailable(String),
    #[error("timed out: {0}")]
    Timeout(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::DataUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::Timeout(msg) => (StatusCode::GATEWAY_TIMEOUT, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<ContentError> for ApiError {
    fn from(e: ContentError) -> Self {
        match e {
            ContentError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            ContentError::AlreadyExists { .. } => ApiError::Conflict(e.to_string()),
            ContentError::MissingReference(msg) => ApiError::BadRequest(msg),
            ContentError::Database(ref err) if is_unavailable(err) => {
                tracing::warn!(error = %err, "database unavailable");
                ApiError::DataUnavailable("database unavailable".to_string())
            }
            ContentError::Database(err) => {
                tracing::error!(error = %err, "content operation failed");
                ApiError::InternalServerError("database error".to_string())
            }
        }
    }
}

impl From<SearchError> for ApiError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidArgument(msg) => ApiError::BadRequest(msg),
            SearchError::DeadlineExceeded { articles_scanned } => {
                tracing::warn!(articles_scanned, "search deadline exceeded");
                ApiError::Timeout("search deadline exceeded".to_string())
            }
        }
    }
}

/// Whether a SQLite error means the data could not be reached, as opposed
/// to a bug in the query.
fn is_unavailable(err: &rusqlite::Error) -> bool {
    use rusqlite::ffi::ErrorCode;
    match err {
        rusqlite::Error::SqliteFailure(failure, _) => matches!(
            failure.code,
            ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::CannotOpen
                | ErrorCode::SystemIoFailure
                | ErrorCode::NotADatabase
                | ErrorCode::DatabaseCorrupt
        ),
        _ => false,
    }
}

/// Runs `f` on a pooled connection inside a blocking task.
///
/// The connection is acquired inside the task and returned to the pool when
/// the task ends, whatever `f` returns. Failure to acquire one is reported
/// as `DataUnavailable`.
pub(crate) async fn with_connection<T, F>(pool: &DbPool, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Connection) -> Result<T, ApiError> + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let conn = pool.get().map_err(|e| {
            tracing::error!(error = %e, "failed to get db connection");
            ApiError::DataUnavailable("database unavailable".to_string())
        })?;
        f(&conn)
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "blocking task join error");
        ApiError::InternalServerError(format!("task join error: {}", e))
    })?
}

/// Rejects an empty or oversized name/title.
pub(crate) fn validate_label(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("{field} must not be empty")));
    }
    if value.len() > MAX_LABEL_LEN {
        return Err(ApiError::BadRequest(format!(
            "{field} exceeds {MAX_LABEL_LEN} bytes"
        )));
    }
    Ok(())
}

/// Rejects an oversized body. Empty bodies are allowed.
pub(crate) fn validate_body(value: &str) -> Result<(), ApiError> {
    if value.len() > MAX_BODY_LEN {
        return Err(ApiError::BadRequest(format!(
            "body exceeds {MAX_BODY_LEN} bytes"
        )));
    }
    Ok(())
}
