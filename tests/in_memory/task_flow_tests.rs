//! End-to-end task queue flows over in-memory adapters.

use super::helpers::{Env, bodies, create_all, env};
use crate::test_helpers::at;
use done::task::{
    domain::{DeadlineInput, Task},
    ports::TaskRepository,
    services::CreateTaskRequest,
};
use rstest::rstest;

fn find<'a>(tasks: &'a [Task], body: &str) -> eyre::Result<&'a Task> {
    tasks
        .iter()
        .find(|task| task.body() == body)
        .ok_or_else(|| eyre::eyre!("task {body} not found"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn queue_survives_removal_reorder_and_insertion(env: Env) -> eyre::Result<()> {
    let created = create_all(&env.service, &["A", "B", "C", "D"]).await?;
    // Queue is now D, C, B, A.
    let b = find(&created, "B")?.id();
    let c = find(&created, "C")?.id();
    let d = find(&created, "D")?.id();

    env.service.remove(c).await?;
    env.service.reorder(d, b).await?;
    env.service.create(CreateTaskRequest::new("E", 0)).await?;

    let pending = env.service.list_pending().await?;
    assert_eq!(bodies(&pending), vec!["E", "B", "D", "A"]);
    let mut orders: Vec<u32> = pending.iter().map(Task::order).collect();
    orders.dedup();
    assert_eq!(orders.len(), pending.len(), "orders must stay unique");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_week_of_completions_builds_points_and_streaks(env: Env) -> eyre::Result<()> {
    let long = env
        .service
        .create(
            CreateTaskRequest::new("Write chapter", 7300)
                .with_deadline(DeadlineInput::new(10, 25, 2026)),
        )
        .await?;
    let created = create_all(&env.service, &["Mon", "Tue", "Fri"]).await?;

    env.clock.set(at(2026, 10, 19, 18));
    env.service.complete(find(&created, "Mon")?.id()).await?;
    env.clock.set(at(2026, 10, 20, 18));
    env.service.complete(find(&created, "Tue")?.id()).await?;
    env.clock.set(at(2026, 10, 20, 21));
    let same_day = env.service.complete(long.id()).await?;
    env.clock.set(at(2026, 10, 23, 7));
    let after_gap = env.service.complete(find(&created, "Fri")?.id()).await?;

    assert_eq!(same_day.points, 60);
    let state = after_gap
        .gamification
        .ok_or_else(|| eyre::eyre!("gamification should update"))?;
    assert_eq!(state.total_points, 90);
    assert_eq!(state.level(), 1);
    assert_eq!(state.completed_count, 4);
    assert_eq!(state.current_streak, 1);
    assert_eq!(state.longest_streak, 2);
    assert_eq!(state.first_completion_date, Some(at(2026, 10, 19, 18)));
    assert_eq!(state.last_completion_date, Some(at(2026, 10, 23, 7)));

    assert!(env.service.list_pending().await?.is_empty());
    assert_eq!(env.tasks.list_completed().await?.len(), 4);
    assert_eq!(bodies(&env.service.completed_today().await?), vec!["Fri"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completed_task_keeps_its_identity_and_timing(env: Env) -> eyre::Result<()> {
    let task = env.service.create(CreateTaskRequest::new("Deep work", 1500)).await?;
    env.service.update_execution_seconds(task.id(), 1320).await?;
    env.clock.set(at(2026, 10, 19, 11));

    let report = env.service.complete(task.id()).await?;

    assert_eq!(report.task.id(), task.id());
    assert_eq!(report.task.actual_seconds(), 1320);
    assert_eq!(report.task.created_at(), at(2026, 10, 19, 9));
    assert_eq!(report.task.completed_at(), Some(at(2026, 10, 19, 11)));
    assert!(env.tasks.find_pending(task.id()).await?.is_none());
    Ok(())
}
