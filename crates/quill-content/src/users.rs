use quill_types::{EntityKind, User};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// Parameters for creating a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserParams {
    pub id: i64,
    pub name: String,
}

/// Creates a new user and returns the stored record.
pub fn create_user(conn: &Connection, params: &CreateUserParams) -> Result<User, ContentError> {
    let user = conn
        .query_row(
            "INSERT INTO users (id, name) VALUES (?1, ?2) RETURNING id, name",
            params![params.id, params.name],
            map_row_to_user,
        )
        .map_err(|e| ContentError::from_insert(e, EntityKind::User, params.id))?;

    tracing::debug!(user_id = user.id, "user created");
    Ok(user)
}

/// Retrieves a user by ID.
pub fn get_user(conn: &Connection, id: i64) -> Result<User, ContentError> {
    conn.query_row(
        "SELECT id, name FROM users WHERE id = ?1",
        [id],
        map_row_to_user,
    )
    .optional()?
    .ok_or(ContentError::NotFound {
        kind: EntityKind::User,
        id,
    })
}

pub(crate) fn user_exists(conn: &Connection, id: i64) -> Result<bool, ContentError> {
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)",
        [id],
        |row| row.get(0),
    )?;
    Ok(exists)
}

fn map_row_to_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}
