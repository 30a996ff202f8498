//! Error types for task domain validation and ordering.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing or parsing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is not a valid UUID.
    #[error("invalid task identifier '{0}'")]
    InvalidTaskId(String),

    /// A deadline component could not be parsed as a number.
    #[error("invalid deadline {component} '{value}'")]
    InvalidDeadlineComponent {
        /// Component name (`month`, `day` or `year`).
        component: &'static str,
        /// Raw value supplied by the caller.
        value: String,
    },

    /// A persisted deadline date could not be parsed.
    #[error("invalid persisted deadline '{0}'")]
    InvalidPersistedDeadline(String),
}

/// Errors returned by the ordering engine.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum OrderingError {
    /// The referenced task is not part of the pending collection.
    #[error("task {0} is not pending")]
    UnknownTask(TaskId),
}
