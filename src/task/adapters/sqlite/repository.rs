//! `SQLite` repository implementation for the task queue.

use super::{
    models::{CompletedTaskRow, PendingTaskRow},
    schema::{completed_tasks, pending_tasks},
};
use crate::storage::SqlitePool;
use crate::task::{
    domain::{Deadline, PersistedTaskData, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sqlite::SqliteConnection;
use tracing::debug;

/// `SQLite`-backed task repository.
#[derive(Debug, Clone)]
pub struct SqliteTaskRepository {
    pool: SqlitePool,
}

impl SqliteTaskRepository {
    /// Creates a new repository from a connection pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn list_pending(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = pending_tasks::table
                .order(pending_tasks::sort_order.asc())
                .select(PendingTaskRow::as_select())
                .load::<PendingTaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(pending_row_to_task).collect()
        })
        .await
    }

    async fn find_pending(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = pending_tasks::table
                .filter(pending_tasks::id.eq(id.to_string()))
                .select(PendingTaskRow::as_select())
                .first::<PendingTaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(pending_row_to_task).transpose()
        })
        .await
    }

    async fn store_pending(&self, task: &Task) -> TaskRepositoryResult<()> {
        let row = to_pending_row(task)?;
        self.run_blocking(move |connection| {
            diesel::replace_into(pending_tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn store_pending_batch(&self, tasks: &[Task]) -> TaskRepositoryResult<()> {
        let rows = tasks
            .iter()
            .map(to_pending_row)
            .collect::<TaskRepositoryResult<Vec<_>>>()?;
        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    for row in &rows {
                        diesel::replace_into(pending_tasks::table)
                            .values(row)
                            .execute(tx)?;
                    }
                    Ok(())
                })
                .map_err(TaskRepositoryError::persistence)?;
            debug!(count = rows.len(), "rewrote pending tasks");
            Ok(())
        })
        .await
    }

    async fn remove_pending(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted =
                diesel::delete(pending_tasks::table.filter(pending_tasks::id.eq(id.to_string())))
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn append_completed(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_completed_row(task)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(completed_tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn list_completed(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = completed_tasks::table
                .order(completed_tasks::completed_at.asc())
                .select(CompletedTaskRow::as_select())
                .load::<CompletedTaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(completed_row_to_task).collect()
        })
        .await
    }
}

fn to_pending_row(task: &Task) -> TaskRepositoryResult<PendingTaskRow> {
    Ok(PendingTaskRow {
        id: task.id().to_string(),
        body: task.body().to_owned(),
        body_canonical: true,
        created_at: task.created_at().to_rfc3339(),
        estimated_seconds: to_column(task.estimated_seconds())?,
        actual_seconds: to_column(task.actual_seconds())?,
        deadline: task.deadline().to_string(),
        sort_order: i64::from(task.order()),
    })
}

fn to_completed_row(task: &Task) -> TaskRepositoryResult<CompletedTaskRow> {
    let completed_at = task.completed_at().ok_or_else(|| {
        TaskRepositoryError::persistence(std::io::Error::other(format!(
            "task {} has no completion timestamp",
            task.id()
        )))
    })?;
    Ok(CompletedTaskRow {
        id: task.id().to_string(),
        body: task.body().to_owned(),
        body_canonical: true,
        created_at: task.created_at().to_rfc3339(),
        completed_at: completed_at.to_rfc3339(),
        estimated_seconds: to_column(task.estimated_seconds())?,
        actual_seconds: to_column(task.actual_seconds())?,
        deadline: task.deadline().to_string(),
        sort_order: i64::from(task.order()),
    })
}

fn pending_row_to_task(row: PendingTaskRow) -> TaskRepositoryResult<Task> {
    let PendingTaskRow {
        id,
        body,
        body_canonical,
        created_at,
        estimated_seconds,
        actual_seconds,
        deadline,
        sort_order,
    } = row;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::parse(&id).map_err(TaskRepositoryError::persistence)?,
        body,
        body_canonical,
        created_at: parse_timestamp(&created_at)?,
        completed_at: None,
        estimated_seconds: from_column(estimated_seconds)?,
        actual_seconds: from_column(actual_seconds)?,
        deadline: parse_deadline(&deadline)?,
        order: from_column(sort_order)?,
    }))
}

fn completed_row_to_task(row: CompletedTaskRow) -> TaskRepositoryResult<Task> {
    let CompletedTaskRow {
        id,
        body,
        body_canonical,
        created_at,
        completed_at,
        estimated_seconds,
        actual_seconds,
        deadline,
        sort_order,
    } = row;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::parse(&id).map_err(TaskRepositoryError::persistence)?,
        body,
        body_canonical,
        created_at: parse_timestamp(&created_at)?,
        completed_at: Some(parse_timestamp(&completed_at)?),
        estimated_seconds: from_column(estimated_seconds)?,
        actual_seconds: from_column(actual_seconds)?,
        deadline: parse_deadline(&deadline)?,
        order: from_column(sort_order)?,
    }))
}

fn to_column(value: u64) -> TaskRepositoryResult<i64> {
    i64::try_from(value).map_err(TaskRepositoryError::persistence)
}

fn from_column<T: TryFrom<i64, Error = std::num::TryFromIntError>>(
    value: i64,
) -> TaskRepositoryResult<T> {
    T::try_from(value).map_err(TaskRepositoryError::persistence)
}

fn parse_timestamp(value: &str) -> TaskRepositoryResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(TaskRepositoryError::persistence)
}

fn parse_deadline(value: &str) -> TaskRepositoryResult<Deadline> {
    value.parse::<Deadline>().map_err(TaskRepositoryError::persistence)
}
