//! Task aggregate root.

use super::{Deadline, TaskId, normalize_body};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A unit of work, pending or completed.
///
/// The body is always canonical text: constructors run new and legacy
/// bodies through [`normalize_body`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    body: String,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    estimated_seconds: u64,
    actual_seconds: u64,
    deadline: Deadline,
    order: u32,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted body, possibly in a legacy encoding.
    pub body: String,
    /// Whether `body` was written already normalized. Only bodies without
    /// this flag are decoded, so canonical text is never decoded twice.
    pub body_canonical: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted completion timestamp, if completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted estimate in seconds.
    pub estimated_seconds: u64,
    /// Persisted elapsed execution time in seconds.
    pub actual_seconds: u64,
    /// Persisted deadline.
    pub deadline: Deadline,
    /// Persisted position among pending tasks.
    pub order: u32,
}

impl Task {
    /// Creates a new pending task at the front of the queue.
    #[must_use]
    pub fn new(body: &str, estimated_seconds: u64, deadline: Deadline, clock: &impl Clock) -> Self {
        Self::new_at(body, estimated_seconds, deadline, clock.utc())
    }

    /// Creates a new pending task stamped with `created_at`.
    #[must_use]
    pub fn new_at(
        body: &str,
        estimated_seconds: u64,
        deadline: Deadline,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TaskId::new(),
            body: normalize_body(body),
            created_at,
            completed_at: None,
            estimated_seconds,
            actual_seconds: 0,
            deadline,
            order: 0,
        }
    }

    /// Reconstructs a task from persisted storage, normalizing a legacy
    /// body.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        let body = if data.body_canonical {
            data.body
        } else {
            normalize_body(&data.body)
        };
        Self {
            id: data.id,
            body,
            created_at: data.created_at,
            completed_at: data.completed_at,
            estimated_seconds: data.estimated_seconds,
            actual_seconds: data.actual_seconds,
            deadline: data.deadline,
            order: data.order,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the canonical body text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the completion timestamp, unset while pending.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns `true` once the task has been completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Returns the estimated duration in seconds.
    #[must_use]
    pub const fn estimated_seconds(&self) -> u64 {
        self.estimated_seconds
    }

    /// Returns the elapsed execution time in seconds.
    #[must_use]
    pub const fn actual_seconds(&self) -> u64 {
        self.actual_seconds
    }

    /// Returns the deadline, possibly the "no deadline" sentinel.
    #[must_use]
    pub const fn deadline(&self) -> Deadline {
        self.deadline
    }

    /// Returns the position among pending tasks.
    #[must_use]
    pub const fn order(&self) -> u32 {
        self.order
    }

    /// Records the running execution time reported by the task timer.
    pub const fn record_execution_seconds(&mut self, seconds: u64) {
        self.actual_seconds = seconds;
    }

    /// Stamps the completion time and returns it.
    pub fn mark_completed(&mut self, clock: &impl Clock) -> DateTime<Utc> {
        let completed_at = clock.utc();
        self.completed_at = Some(completed_at);
        completed_at
    }

    pub(crate) const fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}
