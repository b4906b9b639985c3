use quill_types::{Comment, EntityKind};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use crate::articles::article_exists;
use crate::error::{is_foreign_key_violation, ContentError};
use crate::users::user_exists;

/// Parameters for creating a new comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentParams {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub article_id: i64,
    pub user_id: i64,
}

/// Creates a new comment and returns the stored record.
///
/// Fails with `MissingReference` if the article or the user does not exist.
pub fn create_comment(
    conn: &Connection,
    params: &CreateCommentParams,
) -> Result<Comment, ContentError> {
    let result = conn.query_row(
        "INSERT INTO comments (id, title, body, article_id, user_id)
         VALUES (?1, ?2, ?3, ?4, ?5)
         RETURNING id, title, body, article_id, user_id",
        params![
            params.id,
            params.title,
            params.body,
            params.article_id,
            params.user_id,
        ],
        map_row_to_comment,
    );

    let comment = match result {
        Ok(comment) => comment,
        Err(e) if is_foreign_key_violation(&e) => {
            return Err(missing_comment_reference(conn, params)?);
        }
        Err(e) => return Err(ContentError::from_insert(e, EntityKind::Comment, params.id)),
    };

    tracing::debug!(
        comment_id = comment.id,
        article_id = comment.article_id,
        "comment created"
    );
    Ok(comment)
}

/// SQLite does not say which foreign key failed, so look it up.
fn missing_comment_reference(
    conn: &Connection,
    params: &CreateCommentParams,
) -> Result<ContentError, ContentError> {
    let message = if !article_exists(conn, params.article_id)? {
        format!("article {} does not exist", params.article_id)
    } else if !user_exists(conn, params.user_id)? {
        format!("user {} does not exist", params.user_id)
    } else {
        // Both rows appeared between the insert and the lookup.
        format!(
            "article {} or user {} does not exist",
            params.article_id, params.user_id
        )
    };
    Ok(ContentError::MissingReference(message))
}

/// Retrieves a comment by ID.
pub fn get_comment(conn: &Connection, id: i64) -> Result<Comment, ContentError> {
    conn.query_row(
        "SELECT id, title, body, article_id, user_id FROM comments WHERE id = ?1",
        [id],
        map_row_to_comment,
    )
    .optional()?
    .ok_or(ContentError::NotFound {
        kind: EntityKind::Comment,
        id,
    })
}

/// Lists the comments on an article in ascending ID order.
///
/// Returns `NotFound` if the article does not exist, so an article with no
/// comments can be told apart from a missing one.
pub fn list_comments_for_article(
    conn: &Connection,
    article_id: i64,
) -> Result<Vec<Comment>, ContentError> {
    if !article_exists(conn, article_id)? {
        return Err(ContentError::NotFound {
            kind: EntityKind::Article,
            id: article_id,
        });
    }

    let mut stmt = conn.prepare(
        "SELECT id, title, body, article_id, user_id
         FROM comments WHERE article_id = ?1 ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([article_id], map_row_to_comment)?;
    let mut comments = Vec::new();
    for row in rows {
        comments.push(row?);
    }
    Ok(comments)
}

fn map_row_to_comment(row: &Row) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: row.get(0)?,
        title: row.get(1)?,
        body: row.get(2)?,
        article_id: row.get(3)?,
        user_id: row.get(4)?,
    })
}
