use quill_types::{Article, EntityKind};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use crate::error::{is_foreign_key_violation, ContentError};

/// Parameters for creating a new article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateArticleParams {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub author_id: i64,
}

/// Creates a new article and returns the stored record.
///
/// Fails with `MissingReference` if the author does not exist.
pub fn create_article(
    conn: &Connection,
    params: &CreateArticleParams,
) -> Result<Article, ContentError> {
    let article = conn
        .query_row(
            "INSERT INTO articles (id, title, body, author_id)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, title, body, author_id",
            params![params.id, params.title, params.body, params.author_id],
            map_row_to_article,
        )
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                ContentError::MissingReference(format!(
                    "author {} does not exist",
                    params.author_id
                ))
            } else {
                ContentError::from_insert(e, EntityKind::Article, params.id)
            }
        })?;

    tracing::debug!(
        article_id = article.id,
        author_id = article.author_id,
        body_len = article.body.len(),
        "article created"
    );
    Ok(article)
}

/// Retrieves an article by ID.
pub fn get_article(conn: &Connection, id: i64) -> Result<Article, ContentError> {
    conn.query_row(
        "SELECT id, title, body, author_id FROM articles WHERE id = ?1",
        [id],
        map_row_to_article,
    )
    .optional()?
    .ok_or(ContentError::NotFound {
        kind: EntityKind::Article,
        id,
    })
}

/// Returns `(id, body)` for every article whose body may contain `pattern`,
/// ordered by ID.
///
/// This is a candidate prefilter only. Callers must still locate the
/// occurrences themselves; an empty pattern selects every article.
pub fn candidate_articles(
    conn: &Connection,
    pattern: &str,
) -> Result<Vec<(i64, String)>, ContentError> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, body FROM articles WHERE instr(body, ?1) > 0 ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([pattern], |row| Ok((row.get(0)?, row.get(1)?)))?;
    let mut candidates = Vec::new();
    for row in rows {
        candidates.push(row?);
    }

    tracing::debug!(candidates = candidates.len(), "selected search candidates");
    Ok(candidates)
}

pub(crate) fn article_exists(conn: &Connection, id: i64) -> Result<bool, ContentError> {
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM articles WHERE id = ?1)",
        [id],
        |row| row.get(0),
    )?;
    Ok(exists)
}

fn map_row_to_article(row: &Row) -> rusqlite::Result<Article> {
    Ok(Article {
        id: row.get(0)?,
        title: row.get(1)?,
        body: row.get(2)?,
        author_id: row.get(3)?,
    })
}
