//! Connection pool creation and configuration.

use std::sync::atomic::{AtomicUsize, Ordering};

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;
use thiserror::Error;

/// Path value that selects a private in-memory database.
///
/// For tests only. Shared-cache connections take table locks that ignore
/// `busy_timeout`, so a read racing an open write fails with
/// `SQLITE_LOCKED` instead of waiting.
pub const MEMORY_PATH: &str = ":memory:";

static MEMORY_DB_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Runtime tunables for SQLite connection behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbRuntimeSettings {
    /// Busy timeout for SQLite connections, in milliseconds.
    pub busy_timeout_ms: u64,

    /// Maximum number of pooled SQLite connections.
    pub pool_max_size: u32,
}

impl Default for DbRuntimeSettings {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 5_000,
            pool_max_size: 8,
        }
    }
}

/// A type alias for the SQLite connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Errors that can occur when creating the database pool.
#[derive(Debug, Error)]
pub enum PoolError {
    /// Failed to build the connection pool.
    #[error("failed to create database connection pool: {0}")]
    PoolInit(#[from] r2d2::Error),
}

/// Creates a new SQLite connection pool with WAL mode and foreign keys enabled.
///
/// # Arguments
///
/// * `db_path` - Path to the SQLite database file. [`MEMORY_PATH`] creates a
///   fresh in-memory database shared by every connection of this pool and
///   by no other pool. The database lives as long as one of its connections
///   does, so connections of such a pool are never retired.
///
/// # Errors
///
/// Returns `PoolError::PoolInit` if the connection pool cannot be created.
pub fn create_pool(db_path: &str, settings: DbRuntimeSettings) -> Result<DbPool, PoolError> {
    let mut flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;

    // A plain ":memory:" path would give every pooled connection its own
    // empty database. Name the database and share its cache instead.
    let in_memory = db_path == MEMORY_PATH;
    let target = if in_memory {
        flags |= OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_SHARED_CACHE;
        let n = MEMORY_DB_COUNTER.fetch_add(1, Ordering::Relaxed);
        format!(
            "file:quill-mem-{}-{}?mode=memory&cache=shared",
            std::process::id(),
            n
        )
    } else {
        db_path.to_string()
    };

    tracing::debug!(path = db_path, "opening database pool");

    let manager = SqliteConnectionManager::file(target)
        .with_flags(flags)
        .with_init(move |conn| {
            // In-memory databases report "memory", which is acceptable.
            let journal_mode: String =
                conn.query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))?;
            if journal_mode != "wal" && journal_mode != "memory" {
                return Err(rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_ERROR),
                    Some(format!(
                        "failed to set WAL journal mode, got: {}",
                        journal_mode
                    )),
                ));
            }
            conn.execute_batch(&format!(
                "PRAGMA foreign_keys = ON;
                 PRAGMA busy_timeout = {};",
                settings.busy_timeout_ms
            ))
        });

    let mut builder = Pool::builder().max_size(settings.pool_max_size);
    if in_memory {
        builder = builder.max_lifetime(None).idle_timeout(None);
    }
    let pool = builder.build(manager)?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_in_memory_pool() {
        let settings = DbRuntimeSettings {
            busy_timeout_ms: 2_500,
            pool_max_size: 3,
        };

        let pool = create_pool(MEMORY_PATH, settings).expect("pool creation should succeed");
        let conn = pool.get().expect("should get a connection");

        let mode: String = conn
            .query_row("PRAGMA journal_mode;", [], |row| row.get(0))
            .expect("should query journal_mode");
        assert!(
            mode == "wal" || mode == "memory",
            "unexpected journal_mode: {mode}"
        );

        let fk: i32 = conn
            .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
            .expect("should query foreign_keys");
        assert_eq!(fk, 1, "foreign keys should be enabled");

        let busy_timeout: i32 = conn
            .query_row("PRAGMA busy_timeout;", [], |row| row.get(0))
            .expect("should query busy_timeout");
        assert_eq!(busy_timeout, 2_500, "busy timeout should match settings");

        assert_eq!(pool.max_size(), 3, "pool max size should match settings");
    }

    #[test]
    fn in_memory_pool_connections_share_one_database() {
        let pool = create_pool(MEMORY_PATH, DbRuntimeSettings::default()).unwrap();
        let first = pool.get().unwrap();
        let second = pool.get().unwrap();

        first
            .execute_batch("CREATE TABLE shared_check (id INTEGER PRIMARY KEY);")
            .expect("create should succeed");
        let count: i64 = second
            .query_row("SELECT COUNT(*) FROM shared_check", [], |row| row.get(0))
            .expect("second connection should see the table");
        assert_eq!(count, 0);
    }

    #[test]
    fn in_memory_pool_keeps_its_connections() {
        let memory = create_pool(MEMORY_PATH, DbRuntimeSettings::default()).unwrap();
        assert_eq!(memory.max_lifetime(), None);
        assert_eq!(memory.idle_timeout(), None);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lifetime.db");
        let file = create_pool(path.to_str().unwrap(), DbRuntimeSettings::default()).unwrap();
        assert!(file.max_lifetime().is_some());
    }

    #[test]
    fn in_memory_pools_are_isolated() {
        let a = create_pool(MEMORY_PATH, DbRuntimeSettings::default()).unwrap();
        let b = create_pool(MEMORY_PATH, DbRuntimeSettings::default()).unwrap();

        a.get()
            .unwrap()
            .execute_batch("CREATE TABLE only_in_a (id INTEGER);")
            .unwrap();

        let exists: bool = b
            .get()
            .unwrap()
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE name = 'only_in_a')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(!exists, "separate pools must not share in-memory state");
    }
}
