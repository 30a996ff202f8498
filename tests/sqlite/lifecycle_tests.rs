//! Lifecycle service tests over durable storage.

use super::helpers::{TempDatabase, database};
use crate::test_helpers::{ManualClock, at};
use diesel::connection::SimpleConnection;
use done::gamification::adapters::{
    memory::InMemoryGamificationRepository, sqlite::SqliteGamificationRepository,
};
use done::storage::{self, SqlitePool};
use done::task::{
    adapters::{memory::InMemoryTaskRepository, sqlite::SqliteTaskRepository},
    domain::Task,
    services::{CreateTaskRequest, TaskLifecycleService},
};
use rstest::rstest;
use std::sync::Arc;

type DurableService =
    TaskLifecycleService<SqliteTaskRepository, SqliteGamificationRepository, ManualClock>;

fn service(pool: &SqlitePool, clock: Arc<ManualClock>) -> DurableService {
    TaskLifecycleService::new(
        Arc::new(SqliteTaskRepository::new(pool.clone())),
        Arc::new(SqliteGamificationRepository::new(pool.clone())),
        clock,
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn queue_and_stats_persist_across_restarts(
    database: eyre::Result<TempDatabase>,
) -> eyre::Result<()> {
    let db = database?;
    let clock = Arc::new(ManualClock::new(at(2026, 10, 19, 9)));
    let first_run = service(&db.pool, Arc::clone(&clock));
    let a = first_run.create(CreateTaskRequest::new("Task A", 0)).await?;
    let b = first_run.create(CreateTaskRequest::new("Task B", 0)).await?;
    let c = first_run.create(CreateTaskRequest::new("Task C", 0)).await?;
    first_run.reorder(c.id(), a.id()).await?;
    clock.set(at(2026, 10, 19, 12));
    first_run.complete(b.id()).await?;

    let second_run = service(&db.reopen()?, Arc::clone(&clock));
    let pending = second_run.list_pending().await?;
    let stats = second_run.gamification().await?;
    let today = second_run.completed_today().await?;

    let bodies: Vec<&str> = pending.iter().map(Task::body).collect();
    assert_eq!(bodies, vec!["Task A", "Task C"]);
    assert_eq!(stats.total_points, 10);
    assert_eq!(stats.current_streak, 1);
    assert_eq!(today.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn escaped_body_is_decoded_once_across_rewrites(
    database: eyre::Result<TempDatabase>,
) -> eyre::Result<()> {
    let db = database?;
    let clock = Arc::new(ManualClock::new(at(2026, 10, 19, 9)));
    let durable = service(&db.pool, Arc::clone(&clock));
    let memory = TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(InMemoryGamificationRepository::new()),
        Arc::clone(&clock),
    );

    let created = durable
        .create(CreateTaskRequest::new(r"keep \\n literal", 0))
        .await?;
    let other = durable.create(CreateTaskRequest::new("other", 0)).await?;
    durable.reorder(other.id(), created.id()).await?;
    let in_memory = memory
        .create(CreateTaskRequest::new(r"keep \\n literal", 0))
        .await?;

    let reloaded = service(&db.reopen()?, clock).list_pending().await?;
    let stored = reloaded
        .iter()
        .find(|task| task.id() == created.id())
        .ok_or_else(|| eyre::eyre!("created task should still be pending"))?;

    assert_eq!(created.body(), r"keep \n literal");
    assert_eq!(in_memory.body(), created.body());
    assert_eq!(stored.body(), created.body());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completions_repair_a_corrupt_gamification_record(
    database: eyre::Result<TempDatabase>,
) -> eyre::Result<()> {
    let db = database?;
    db.pool.get()?.batch_execute(
        r#"INSERT INTO gamification (key, payload)
           VALUES ('stats', '{"total_points":-5,"completed_tasks":2}')"#,
    )?;
    let clock = Arc::new(ManualClock::new(at(2026, 10, 19, 9)));
    let tasks = service(&db.pool, clock);
    let first = tasks.create(CreateTaskRequest::new("first", 0)).await?;
    let second = tasks.create(CreateTaskRequest::new("second", 0)).await?;

    let first_report = tasks.complete(first.id()).await?;
    let second_report = tasks.complete(second.id()).await?;
    let stats = tasks.gamification().await?;

    assert!(first_report.gamification.is_some());
    assert_eq!(second_report.gamification.as_ref(), Some(&stats));
    assert_eq!(stats.total_points, 20);
    assert_eq!(stats.completed_count, 4);
    Ok(())
}

#[rstest]
fn upgrade_reports_current_schema(database: eyre::Result<TempDatabase>) -> eyre::Result<()> {
    let db = database?;

    let message = storage::upgrade(&db.pool)?;

    assert!(message.contains("nothing to upgrade"), "{message}");
    Ok(())
}
