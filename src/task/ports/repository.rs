//! Repository port for pending tasks and the completed-task log.

use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Writes are durable on return. Implementations hold no state beyond the
/// store itself, so services never cache tasks between calls.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns every pending task sorted by ascending order value.
    async fn list_pending(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Finds a pending task by identifier.
    ///
    /// Returns `None` when the task is not pending.
    async fn find_pending(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Inserts or replaces a pending task.
    async fn store_pending(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Inserts or replaces several pending tasks as one atomic write.
    ///
    /// Used for full-collection order rewrites.
    async fn store_pending_batch(&self, tasks: &[Task]) -> TaskRepositoryResult<()>;

    /// Deletes a pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task is not
    /// pending.
    async fn remove_pending(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Appends a task to the completed log.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the log already
    /// holds a task with the same identifier.
    async fn append_completed(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Returns every completed task.
    async fn list_completed(&self) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
