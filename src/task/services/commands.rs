//! Transport-agnostic command surface over the lifecycle service.
//!
//! Adapters (the CLI, or an HTTP layer) parse their input into a
//! [`TaskCommand`] and render the returned [`CommandOutcome`].

use super::{CreateTaskRequest, TaskLifecycleResult, TaskLifecycleService};
use crate::gamification::{domain::GamificationState, ports::GamificationRepository};
use crate::task::{
    domain::{Task, TaskId},
    ports::TaskRepository,
};
use mockable::Clock;
use serde::Serialize;

/// A parsed inbound command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskCommand {
    /// List pending tasks.
    ListTasks,
    /// Create a task at the front of the queue.
    CreateTask(CreateTaskRequest),
    /// Delete a pending task.
    RemoveTask {
        /// Task to delete.
        id: TaskId,
    },
    /// Move a task into another task's slot.
    ReorderTask {
        /// Task being moved.
        source_id: TaskId,
        /// Task whose slot the source takes.
        destination_id: TaskId,
    },
    /// Complete a pending task.
    CompleteTask {
        /// Task to complete.
        id: TaskId,
    },
    /// Record the running execution time of a pending task.
    UpdateExecutionSeconds {
        /// Task being timed.
        id: TaskId,
        /// Elapsed seconds so far.
        seconds: u64,
    },
    /// List tasks completed today.
    TodayResults,
    /// Read the gamification record.
    GetGamification,
    /// Replace the gamification record.
    SetGamification {
        /// New record.
        state: GamificationState,
    },
}

impl TaskCommand {
    /// Parses a task identifier supplied by a front end.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`](super::TaskLifecycleError::InvalidInput) when
    /// `raw` is not a task identifier.
    pub fn parse_id(raw: &str) -> TaskLifecycleResult<TaskId> {
        Ok(TaskId::parse(raw)?)
    }
}

/// Result of executing a [`TaskCommand`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// A task list: the pending queue, or today's completions.
    Tasks(Vec<Task>),
    /// The gamification record.
    Gamification(GamificationState),
    /// The command succeeded.
    Acknowledged,
    /// The command succeeded and returns nothing.
    NoContent,
}

impl<R, G, C> TaskLifecycleService<R, G, C>
where
    R: TaskRepository,
    G: GamificationRepository,
    C: Clock + Send + Sync,
{
    /// Executes one command end to end.
    ///
    /// Mutating task commands answer with the updated pending list.
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying operation.
    pub async fn execute(&self, command: TaskCommand) -> TaskLifecycleResult<CommandOutcome> {
        match command {
            TaskCommand::ListTasks => {}
            TaskCommand::CreateTask(request) => {
                self.create(request).await?;
            }
            TaskCommand::RemoveTask { id } => self.remove(id).await?,
            TaskCommand::ReorderTask {
                source_id,
                destination_id,
            } => {
                self.reorder(source_id, destination_id).await?;
            }
            TaskCommand::CompleteTask { id } => {
                self.complete(id).await?;
            }
            TaskCommand::UpdateExecutionSeconds { id, seconds } => {
                self.update_execution_seconds(id, seconds).await?;
                return Ok(CommandOutcome::NoContent);
            }
            TaskCommand::TodayResults => {
                return Ok(CommandOutcome::Tasks(self.completed_today().await?));
            }
            TaskCommand::GetGamification => {
                return Ok(CommandOutcome::Gamification(self.gamification().await?));
            }
            TaskCommand::SetGamification { state } => {
                self.set_gamification(&state).await?;
                return Ok(CommandOutcome::Acknowledged);
            }
        }
        Ok(CommandOutcome::Tasks(self.list_pending().await?))
    }
}
