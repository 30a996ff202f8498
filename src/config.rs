//! Runtime configuration.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the database location.
pub const DB_PATH_ENV: &str = "DONE_DB_PATH";

/// File name of the database inside the home directory.
pub const DB_FILE_NAME: &str = "tasks.db";

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoneConfig {
    /// Location of the `SQLite` database file.
    pub db_path: PathBuf,
    /// Explicit tracing filter directive, if one was given.
    pub log_filter: Option<String>,
}

/// Errors raised while preparing the configured environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The database directory could not be created.
    #[error("failed to create database directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
}

impl DoneConfig {
    /// Resolves configuration against the current user's home directory.
    ///
    /// An explicit `db_path` wins; otherwise the database lives at
    /// `<home>/tasks.db`, or `./tasks.db` when no home directory is known.
    #[must_use]
    pub fn resolve(db_path: Option<PathBuf>, log_filter: Option<String>) -> Self {
        Self::resolve_with_home(db_path, log_filter, dirs::home_dir())
    }

    /// Resolves configuration against an explicit home directory.
    #[must_use]
    pub fn resolve_with_home(
        db_path: Option<PathBuf>,
        log_filter: Option<String>,
        home: Option<PathBuf>,
    ) -> Self {
        Self {
            db_path: db_path.unwrap_or_else(|| {
                home.unwrap_or_else(|| PathBuf::from("."))
                    .join(DB_FILE_NAME)
            }),
            log_filter: log_filter
                .map(|raw| raw.trim().to_owned())
                .filter(|raw| !raw.is_empty()),
        }
    }

    /// Creates the directory holding the database file if it is missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CreateDir`] when the directory cannot be
    /// created.
    pub fn ensure_parent_dir(&self) -> Result<(), ConfigError> {
        let Some(parent) = self.db_path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })
    }

    /// Returns the database path.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}
