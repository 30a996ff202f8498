//! In-memory gamification repository.

use crate::gamification::{
    domain::GamificationState,
    ports::{GamificationRepository, GamificationRepositoryError, GamificationRepositoryResult},
};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory gamification repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGamificationRepository {
    state: Arc<RwLock<Option<GamificationState>>>,
}

impl InMemoryGamificationRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GamificationRepository for InMemoryGamificationRepository {
    async fn load(&self) -> GamificationRepositoryResult<GamificationState> {
        let state = self.state.read().map_err(|err| {
            GamificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.clone().unwrap_or_default())
    }

    async fn save(&self, state: &GamificationState) -> GamificationRepositoryResult<()> {
        let mut stored = self.state.write().map_err(|err| {
            GamificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        *stored = Some(state.clone());
        Ok(())
    }
}
