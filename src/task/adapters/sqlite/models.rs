//! Diesel row models for task persistence.

use super::schema::{completed_tasks, pending_tasks};
use diesel::prelude::*;

/// Row model for pending task records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = pending_tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PendingTaskRow {
    /// Task identifier.
    pub id: String,
    /// Stored body text.
    pub body: String,
    /// Set when the body was written already normalized.
    pub body_canonical: bool,
    /// Creation timestamp.
    pub created_at: String,
    /// Estimated duration in seconds.
    pub estimated_seconds: i64,
    /// Elapsed execution time in seconds.
    pub actual_seconds: i64,
    /// Deadline date.
    pub deadline: String,
    /// Position among pending tasks.
    pub sort_order: i64,
}

/// Row model for completed task records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = completed_tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CompletedTaskRow {
    /// Task identifier.
    pub id: String,
    /// Stored body text.
    pub body: String,
    /// Set when the body was written already normalized.
    pub body_canonical: bool,
    /// Creation timestamp.
    pub created_at: String,
    /// Completion timestamp.
    pub completed_at: String,
    /// Estimated duration in seconds.
    pub estimated_seconds: i64,
    /// Elapsed execution time in seconds.
    pub actual_seconds: i64,
    /// Deadline date.
    pub deadline: String,
    /// Order value held at completion.
    pub sort_order: i64,
}
