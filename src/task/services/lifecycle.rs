//! Service layer coordinating task creation, ordering and completion.

use crate::gamification::{
    domain::{GamificationState, completion_points, record_completion},
    ports::{GamificationRepository, GamificationRepositoryError},
};
use crate::task::{
    domain::{
        Deadline, DeadlineInput, OrderingError, Reposition, Task, TaskDomainError, TaskId,
        ordering,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    body: String,
    estimated_seconds: u64,
    deadline: DeadlineInput,
}

impl CreateTaskRequest {
    /// Creates a request without a deadline.
    #[must_use]
    pub fn new(body: impl Into<String>, estimated_seconds: u64) -> Self {
        Self {
            body: body.into(),
            estimated_seconds,
            deadline: DeadlineInput::unset(),
        }
    }

    /// Sets the partial deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DeadlineInput) -> Self {
        self.deadline = deadline;
        self
    }

    /// Sets the partial deadline from raw form fields.
    ///
    /// Unparsable fields degrade to unset; see [`DeadlineInput::from_raw`].
    #[must_use]
    pub fn with_raw_deadline(self, month: &str, day: &str, year: &str) -> Self {
        self.with_deadline(DeadlineInput::from_raw(month, day, year))
    }

    /// Returns the raw body text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the estimate in seconds.
    #[must_use]
    pub const fn estimated_seconds(&self) -> u64 {
        self.estimated_seconds
    }

    /// Returns the partial deadline.
    #[must_use]
    pub const fn deadline(&self) -> DeadlineInput {
        self.deadline
    }
}

/// Result of completing a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionReport {
    /// The task as appended to the completed log.
    pub task: Task,
    /// Points the completion was worth.
    pub points: u32,
    /// Updated gamification record, or `None` when it could not be loaded
    /// or saved. The completion stands either way.
    pub gamification: Option<GamificationState>,
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// The referenced task is not pending.
    #[error("task {0} not found")]
    NotFound(TaskId),
    /// A command field could not be interpreted.
    #[error(transparent)]
    InvalidInput(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),
    /// Gamification repository operation failed.
    #[error(transparent)]
    Gamification(#[from] GamificationRepositoryError),
}

impl From<TaskRepositoryError> for TaskLifecycleError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

impl From<OrderingError> for TaskLifecycleError {
    fn from(err: OrderingError) -> Self {
        match err {
            OrderingError::UnknownTask(id) => Self::NotFound(id),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Mutating operations read the pending collection, rewrite it and write it
/// back. They take a process-wide lock so those sequences never interleave.
#[derive(Clone)]
pub struct TaskLifecycleService<R, G, C>
where
    R: TaskRepository,
    G: GamificationRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    gamification: Arc<G>,
    clock: Arc<C>,
    mutation_lock: Arc<Mutex<()>>,
}

impl<R, G, C> TaskLifecycleService<R, G, C>
where
    R: TaskRepository,
    G: GamificationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub fn new(tasks: Arc<R>, gamification: Arc<G>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            gamification,
            clock,
            mutation_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns pending tasks in queue order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn list_pending(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.tasks.list_pending().await?)
    }

    /// Creates a task at the front of the queue.
    ///
    /// The body is normalized, the deadline resolved against today, and
    /// every existing pending task shifts back by one.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the pending collection
    /// cannot be read or rewritten.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let _guard = self.mutation_lock.lock().await;

        let now = self.clock.utc();
        let deadline = Deadline::resolve(request.deadline, now.date_naive());
        let task = Task::new_at(&request.body, request.estimated_seconds, deadline, now);

        let mut pending = self.tasks.list_pending().await?;
        ordering::insert_at_front(&mut pending, task.clone());
        self.tasks.store_pending_batch(&pending).await?;

        info!(
            task_id = %task.id(),
            deadline = %task.deadline(),
            pending = pending.len(),
            "created task"
        );
        Ok(task)
    }

    /// Deletes a pending task without completing it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task is not pending.
    pub async fn remove(&self, id: TaskId) -> TaskLifecycleResult<()> {
        let _guard = self.mutation_lock.lock().await;
        self.tasks.remove_pending(id).await?;
        info!(task_id = %id, "removed task");
        Ok(())
    }

    /// Moves `source` into the queue slot held by `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when either task is missing;
    /// nothing is written in that case.
    pub async fn reorder(
        &self,
        source: TaskId,
        destination: TaskId,
    ) -> TaskLifecycleResult<Reposition> {
        let _guard = self.mutation_lock.lock().await;

        let mut pending = self.tasks.list_pending().await?;
        let outcome = ordering::reposition(&mut pending, source, destination)?;
        match outcome {
            Reposition::Unchanged => {
                debug!(task_id = %source, "reorder onto itself ignored");
            }
            Reposition::Moved { from, to } => {
                self.tasks.store_pending_batch(&pending).await?;
                info!(
                    source = %source,
                    destination = %destination,
                    from,
                    to,
                    "moved task"
                );
            }
        }
        Ok(outcome)
    }

    /// Completes a pending task and credits the gamification record.
    ///
    /// The task is appended to the completed log before it leaves the
    /// pending collection. If an earlier attempt logged the task but failed
    /// to remove it, the logged entry is kept and the removal finished; the
    /// record is credited once, when the task leaves the pending collection.
    /// Gamification is best effort: a failure to load or save the record is
    /// logged and the completion still succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task is not pending,
    /// or [`TaskLifecycleError::Repository`] when moving it fails.
    pub async fn complete(&self, id: TaskId) -> TaskLifecycleResult<CompletionReport> {
        let _guard = self.mutation_lock.lock().await;

        let mut attempt = self
            .tasks
            .find_pending(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))?;
        let attempted_at = attempt.mark_completed(&*self.clock);
        let task = match self.tasks.append_completed(&attempt).await {
            Ok(()) => attempt,
            Err(TaskRepositoryError::DuplicateTask(_)) => self.logged_completion(attempt).await?,
            Err(err) => return Err(err.into()),
        };
        self.tasks.remove_pending(id).await?;

        let completed_at = task.completed_at().unwrap_or(attempted_at);
        let points = completion_points(&task, completed_at);
        let gamification = self.credit_completion(&task).await;
        info!(task_id = %id, points, "completed task");

        Ok(CompletionReport {
            task,
            points,
            gamification,
        })
    }

    async fn logged_completion(&self, attempt: Task) -> TaskLifecycleResult<Task> {
        let logged = self
            .tasks
            .list_completed()
            .await?
            .into_iter()
            .find(|task| task.id() == attempt.id());
        warn!(
            task_id = %attempt.id(),
            "task already in completed log; finishing interrupted completion"
        );
        Ok(logged.unwrap_or(attempt))
    }

    async fn credit_completion(&self, task: &Task) -> Option<GamificationState> {
        let completed_at = task.completed_at()?;
        let previous = match self.gamification.load().await {
            Ok(state) => state,
            Err(err) => {
                warn!(
                    error = %err,
                    task_id = %task.id(),
                    "gamification state unavailable; skipping update"
                );
                return None;
            }
        };

        let updated = record_completion(task, previous, completed_at);
        if let Err(err) = self.gamification.save(&updated).await {
            warn!(
                error = %err,
                task_id = %task.id(),
                "failed to save gamification state; completion kept"
            );
            return None;
        }
        debug!(
            total_points = updated.total_points,
            level = updated.level(),
            streak = updated.current_streak,
            "gamification updated"
        );
        Some(updated)
    }

    /// Records the running execution time of a pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task is not pending.
    pub async fn update_execution_seconds(
        &self,
        id: TaskId,
        seconds: u64,
    ) -> TaskLifecycleResult<Task> {
        let _guard = self.mutation_lock.lock().await;

        let mut task = self
            .tasks
            .find_pending(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))?;
        task.record_execution_seconds(seconds);
        self.tasks.store_pending(&task).await?;
        debug!(task_id = %id, seconds, "recorded execution time");
        Ok(task)
    }

    /// Returns tasks completed on the current UTC calendar day.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the log cannot be
    /// read.
    pub async fn completed_today(&self) -> TaskLifecycleResult<Vec<Task>> {
        let today = self.clock.utc().date_naive();
        let completed = self.tasks.list_completed().await?;
        Ok(completed
            .into_iter()
            .filter(|task| {
                task.completed_at()
                    .is_some_and(|at| at.date_naive() == today)
            })
            .collect())
    }

    /// Returns the gamification record, defaulted when none is stored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Gamification`] when loading fails.
    pub async fn gamification(&self) -> TaskLifecycleResult<GamificationState> {
        Ok(self.gamification.load().await?)
    }

    /// Replaces the gamification record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Gamification`] when saving fails.
    pub async fn set_gamification(&self, state: &GamificationState) -> TaskLifecycleResult<()> {
        let _guard = self.mutation_lock.lock().await;
        self.gamification.save(state).await?;
        info!(total_points = state.total_points, "gamification state replaced");
        Ok(())
    }
}
