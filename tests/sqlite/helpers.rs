//! Shared fixtures for `SQLite` integration tests.

use done::storage::{self, SqlitePool};
use rstest::fixture;
use std::path::PathBuf;
use tempfile::TempDir;

/// Database opened inside a temporary directory.
///
/// The directory lives as long as this value.
pub struct TempDatabase {
    pub dir: TempDir,
    pub path: PathBuf,
    pub pool: SqlitePool,
}

impl TempDatabase {
    /// Opens a second pool on the same file, as a restarted process would.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be reopened.
    pub fn reopen(&self) -> eyre::Result<SqlitePool> {
        Ok(storage::open(&self.path)?)
    }
}

/// Provides a freshly created database.
///
/// # Errors
///
/// Returns an error if the directory or database cannot be created.
#[fixture]
pub fn database() -> eyre::Result<TempDatabase> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("tasks.db");
    let pool = storage::open(&path)?;
    Ok(TempDatabase { dir, path, pool })
}
