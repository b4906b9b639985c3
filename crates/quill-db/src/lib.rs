//! Database layer for the Quill content service.
//!
//! Provides SQLite connection pooling (via `r2d2`), WAL-mode initialization,
//! and embedded SQL migrations for the `users`, `articles`, and `comments`
//! tables.
//!
//! Connections are handed out per request and returned to the pool when the
//! guard is dropped; nothing in the workspace holds a process-wide session.

mod migrations;
mod pool;

pub use migrations::{run_migrations, MigrationError};
pub use pool::{create_pool, DbPool, DbRuntimeSettings, PoolError, MEMORY_PATH};
