//! Handler for `/find_string`, the substring position search.
//!
//! The content store narrows the corpus with a containment filter, then the
//! occurrence finder rescans every candidate and reports each (possibly
//! overlapping) match offset.
//!
//! The deadline starts when the request is accepted, so waiting for a pooled
//! connection and running the candidate query use up part of it. Neither
//! step is interrupted; the deadline is only enforced by the finder, before
//! each candidate and between chunks of a long body.

use crate::api::{with_connection, ApiError};
use crate::AppState;
use axum::extract::{Extension, Json, Query};
use quill_content::candidate_articles;
use quill_search::{find_compiled, Pattern, SearchLimits};
use quill_types::MatchGroup;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Search tunables carried in application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    /// Deadline for one search request.
    pub timeout: Duration,
    /// Longest accepted search string, in bytes.
    pub max_pattern_len: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            max_pattern_len: 1024,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FindStringParams {
    pub search_string: Option<String>,
}

/// GET /find_string?search_string=...
///
/// Returns `[{"article_id": .., "offsets": [..]}, ..]` ordered by article id.
/// No match anywhere is a 404.
pub async fn find_string_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<FindStringParams>,
) -> Result<Json<Vec<MatchGroup>>, ApiError> {
    let search_string = params
        .search_string
        .ok_or_else(|| ApiError::BadRequest("missing search_string parameter".to_string()))?;

    if search_string.len() > state.search.max_pattern_len {
        return Err(ApiError::BadRequest(format!(
            "search_string exceeds {} bytes",
            state.search.max_pattern_len
        )));
    }

    let pattern = Pattern::new(&search_string)?;
    let limits = SearchLimits::with_timeout(state.search.timeout);

    let groups = with_connection(&state.pool, move |conn| {
        let candidates = candidate_articles(conn, pattern.as_str())?;
        Ok(find_compiled(&pattern, candidates, limits)?)
    })
    .await?;

    if groups.is_empty() {
        tracing::debug!(pattern_len = search_string.len(), "search string not found");
        return Err(ApiError::NotFound(
            "string not found in any article".to_string(),
        ));
    }

    tracing::info!(
        pattern_len = search_string.len(),
        articles = groups.len(),
        "search string located"
    );
    Ok(Json(groups))
}
