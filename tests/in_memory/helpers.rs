//! Shared fixtures for in-memory integration tests.

use crate::test_helpers::{ManualClock, at};
use done::gamification::adapters::memory::InMemoryGamificationRepository;
use done::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{CreateTaskRequest, TaskLifecycleService},
};
use rstest::fixture;
use std::sync::Arc;

/// Service wired to in-memory adapters.
pub type TestService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryGamificationRepository, ManualClock>;

/// Service plus handles on its clock and task store.
pub struct Env {
    pub service: TestService,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub clock: Arc<ManualClock>,
}

/// Provides a fresh service starting at 2026-10-19 09:00 UTC.
#[fixture]
pub fn env() -> Env {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let clock = Arc::new(ManualClock::new(at(2026, 10, 19, 9)));
    let service = TaskLifecycleService::new(
        Arc::clone(&tasks),
        Arc::new(InMemoryGamificationRepository::new()),
        Arc::clone(&clock),
    );
    Env {
        service,
        tasks,
        clock,
    }
}

/// Creates one task per body, in the given order.
///
/// # Errors
///
/// Returns an error if any creation fails.
pub async fn create_all(service: &TestService, bodies: &[&str]) -> eyre::Result<Vec<Task>> {
    let mut created = Vec::with_capacity(bodies.len());
    for body in bodies {
        created.push(service.create(CreateTaskRequest::new(*body, 0)).await?);
    }
    Ok(created)
}

/// Returns the bodies of `tasks` in slice order.
pub fn bodies(tasks: &[Task]) -> Vec<String> {
    tasks.iter().map(|task| task.body().to_owned()).collect()
}
