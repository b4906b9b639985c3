//! Schema versioning for the content database.
//!
//! Every step carries a version number. `_quill_schema` records the steps
//! already applied; on startup every step above the highest recorded version
//! runs in order, each in one transaction with the row that records it.

use rusqlite::{params, Connection};
use thiserror::Error;

struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

/// Schema steps in ascending version order. Append only.
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "users",
        sql: include_str!("migrations/001_users.sql"),
    },
    Migration {
        version: 2,
        name: "articles",
        sql: include_str!("migrations/002_articles.sql"),
    },
    Migration {
        version: 3,
        name: "comments",
        sql: include_str!("migrations/003_comments.sql"),
    },
];

const SCHEMA_TABLE: &str = "CREATE TABLE IF NOT EXISTS _quill_schema (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);";

/// Errors raised while bringing the schema up to date.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("failed to create schema version table: {0}")]
    Bootstrap(#[source] rusqlite::Error),

    #[error("failed to read schema version: {0}")]
    StateQuery(#[source] rusqlite::Error),

    /// A step failed; nothing it did was kept.
    #[error("schema step {version} ({name}) failed: {source}")]
    ExecutionFailed {
        version: i64,
        name: &'static str,
        source: rusqlite::Error,
    },
}

/// Applies every schema step newer than the database's current version.
///
/// Returns how many steps ran; zero means the schema was already current.
///
/// # Errors
///
/// Returns `MigrationError` if the version table cannot be created or read,
/// or if a step fails. Steps applied before the failing one stay applied.
pub fn run_migrations(conn: &Connection) -> Result<usize, MigrationError> {
    upgrade(conn, MIGRATIONS)
}

fn upgrade(conn: &Connection, steps: &[Migration]) -> Result<usize, MigrationError> {
    conn.execute_batch(SCHEMA_TABLE).map_err(MigrationError::Bootstrap)?;

    let current = current_version(conn)?;
    let pending: Vec<&Migration> = steps
        .iter()
        .filter(|step| current.map_or(true, |v| step.version > v))
        .collect();

    if pending.is_empty() {
        tracing::debug!(version = ?current, "schema up to date");
        return Ok(0);
    }

    for step in &pending {
        apply(conn, step)?;
    }
    Ok(pending.len())
}

/// Highest recorded version, or `None` on a fresh database.
fn current_version(conn: &Connection) -> Result<Option<i64>, MigrationError> {
    conn.query_row("SELECT MAX(version) FROM _quill_schema", [], |row| row.get(0))
        .map_err(MigrationError::StateQuery)
}

fn apply(conn: &Connection, step: &Migration) -> Result<(), MigrationError> {
    let failed = |source: rusqlite::Error| MigrationError::ExecutionFailed {
        version: step.version,
        name: step.name,
        source,
    };

    let tx = conn.unchecked_transaction().map_err(failed)?;
    tx.execute_batch(step.sql).map_err(failed)?;
    tx.execute(
        "INSERT INTO _quill_schema (version, name) VALUES (?1, ?2)",
        params![step.version, step.name],
    )
    .map_err(failed)?;
    tx.commit().map_err(failed)?;

    tracing::info!(version = step.version, step = step.name, "applied schema step");
    Ok(())
}
