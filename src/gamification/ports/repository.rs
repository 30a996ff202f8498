//! Repository port for the single gamification record.

use crate::gamification::domain::GamificationState;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for gamification repository operations.
pub type GamificationRepositoryResult<T> = Result<T, GamificationRepositoryError>;

/// Gamification persistence contract.
#[async_trait]
pub trait GamificationRepository: Send + Sync {
    /// Loads the record, or a zero-valued default when none is stored or
    /// the stored record cannot be decoded.
    ///
    /// Errors are reserved for storage failures.
    async fn load(&self) -> GamificationRepositoryResult<GamificationState>;

    /// Replaces the stored record.
    async fn save(&self, state: &GamificationState) -> GamificationRepositoryResult<()>;
}

/// Errors returned by gamification repository implementations.
#[derive(Debug, Clone, Error)]
pub enum GamificationRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl GamificationRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
