use quill_types::EntityKind;
use thiserror::Error;

/// Errors that can occur during content store operations.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: i64 },
    #[error("{kind} already exists: {id}")]
    AlreadyExists { kind: EntityKind, id: i64 },
    /// A referenced row (author, article, or commenter) does not exist.
    #[error("missing reference: {0}")]
    MissingReference(String),
}

impl ContentError {
    /// Classifies a failed insert of `kind` with identifier `id`.
    ///
    /// Primary-key and unique violations become `AlreadyExists`; everything
    /// else stays a `Database` error. Foreign-key violations are left to the
    /// caller, which knows which reference to report.
    pub(crate) fn from_insert(err: rusqlite::Error, kind: EntityKind, id: i64) -> Self {
        if let rusqlite::Error::SqliteFailure(ref failure, _) = err {
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
            {
                return ContentError::AlreadyExists { kind, id };
            }
        }
        ContentError::Database(err)
    }
}

pub(crate) fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}
