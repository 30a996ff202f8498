//! `SQLite` gamification repository.
//!
//! The record lives as one JSON payload under a fixed key, so fields added
//! or dropped over time never need a column migration. A payload that is
//! not a JSON record at all loads as the default record, so the next save
//! replaces it instead of failing every completion after it.

use crate::gamification::{
    domain::GamificationState,
    ports::{GamificationRepository, GamificationRepositoryError, GamificationRepositoryResult},
};
use crate::storage::SqlitePool;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use tracing::warn;

/// Key of the single gamification record.
pub const GAMIFICATION_KEY: &str = "stats";

diesel::table! {
    /// Gamification records keyed by name.
    gamification (key) {
        /// Record key.
        key -> Text,
        /// JSON payload.
        payload -> Text,
    }
}

/// Row model for the gamification record.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = gamification)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GamificationRow {
    /// Record key.
    pub key: String,
    /// JSON payload.
    pub payload: String,
}

/// `SQLite`-backed gamification repository.
#[derive(Debug, Clone)]
pub struct SqliteGamificationRepository {
    pool: SqlitePool,
}

impl SqliteGamificationRepository {
    /// Creates a new repository from a connection pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> GamificationRepositoryResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> GamificationRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(GamificationRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(GamificationRepositoryError::persistence)?
    }
}

#[async_trait]
impl GamificationRepository for SqliteGamificationRepository {
    async fn load(&self) -> GamificationRepositoryResult<GamificationState> {
        self.run_blocking(|connection| {
            let row = gamification::table
                .filter(gamification::key.eq(GAMIFICATION_KEY))
                .select(GamificationRow::as_select())
                .first::<GamificationRow>(connection)
                .optional()
                .map_err(GamificationRepositoryError::persistence)?;
            Ok(row.map_or_else(GamificationState::default, |stored| {
                decode_payload(&stored.payload)
            }))
        })
        .await
    }

    async fn save(&self, state: &GamificationState) -> GamificationRepositoryResult<()> {
        let row = GamificationRow {
            key: GAMIFICATION_KEY.to_owned(),
            payload: serde_json::to_string(state)
                .map_err(GamificationRepositoryError::persistence)?,
        };
        self.run_blocking(move |connection| {
            diesel::replace_into(gamification::table)
                .values(&row)
                .execute(connection)
                .map_err(GamificationRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }
}

fn decode_payload(payload: &str) -> GamificationState {
    serde_json::from_str(payload).unwrap_or_else(|err| {
        warn!(error = %err, "unreadable gamification record; starting from defaults");
        GamificationState::default()
    })
}
