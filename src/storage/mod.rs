//! Embedded `SQLite` storage shared by the durable adapters.
//!
//! One database file holds three collections: pending tasks, the completed
//! log and the gamification record. The pool is capped at a single
//! connection, which serializes every read-modify-write against the file.

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::sqlite::SqliteConnection;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// `SQLite` connection pool type used by the durable adapters.
pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Schema applied on every open. Statements are idempotent.
pub const SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_task_tables/up.sql");

/// Version of the schema created by [`SCHEMA_SQL`].
pub const SCHEMA_VERSION: u32 = 1;

/// Errors raised while opening or upgrading the store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The connection pool could not be built or yield a connection.
    #[error("failed to open database: {0}")]
    Pool(#[from] PoolError),

    /// Applying the schema failed.
    #[error("failed to apply schema: {0}")]
    Schema(#[from] diesel::result::Error),
}

/// Opens (creating if needed) the database file and applies the schema.
///
/// # Errors
///
/// Returns [`StorageError`] when the file cannot be opened or the schema
/// cannot be applied.
pub fn open(path: &Path) -> Result<SqlitePool, StorageError> {
    let manager = ConnectionManager::<SqliteConnection>::new(path.to_string_lossy());
    let pool = Pool::builder().max_size(1).build(manager)?;
    apply_schema(&pool)?;
    info!(path = %path.display(), "opened task database");
    Ok(pool)
}

fn apply_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    let mut connection = pool.get()?;
    connection.batch_execute(SCHEMA_SQL)?;
    debug!(version = SCHEMA_VERSION, "schema applied");
    Ok(())
}

/// Brings the database up to the current schema.
///
/// Only one schema version exists, so this re-applies the idempotent
/// bootstrap and reports that nothing needed to change.
///
/// # Errors
///
/// Returns [`StorageError`] when the schema cannot be applied.
pub fn upgrade(pool: &SqlitePool) -> Result<String, StorageError> {
    apply_schema(pool)?;
    Ok(format!(
        "database schema is current (version {SCHEMA_VERSION}); nothing to upgrade"
    ))
}
