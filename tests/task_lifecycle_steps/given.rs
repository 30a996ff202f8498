//! Given steps for task lifecycle BDD scenarios.

use super::world::{TaskWorld, body_list, run_async};
use crate::test_helpers::at;
use done::task::{domain::DeadlineInput, services::CreateTaskRequest};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("an empty task queue")]
fn empty_task_queue(world: &TaskWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(world.pending()?.is_empty(), "expected an empty queue");
    Ok(())
}

#[given(r#"the queue holds "{bodies}""#)]
fn queue_holds(world: &mut TaskWorld, bodies: String) -> Result<(), eyre::Report> {
    for body in body_list(&bodies).into_iter().rev() {
        run_async(world.service.create(CreateTaskRequest::new(body, 0)))
            .wrap_err("seed queue")?;
    }
    Ok(())
}

#[given(r#"a task "{body}" estimated at {seconds:u64} seconds due on {month:u32}/{day:u32}"#)]
fn task_with_estimate_and_deadline(
    world: &mut TaskWorld,
    body: String,
    seconds: u64,
    month: u32,
    day: u32,
) -> Result<(), eyre::Report> {
    let request =
        CreateTaskRequest::new(body, seconds).with_deadline(DeadlineInput::new(month, day, 0));
    run_async(world.service.create(request)).wrap_err("create task with deadline")?;
    Ok(())
}

#[given(r#"the user completed "{body}" on October {day:u32}"#)]
fn completed_on_day(world: &mut TaskWorld, body: String, day: u32) -> Result<(), eyre::Report> {
    world.clock.set(at(2026, 10, day, 12));
    let task = run_async(world.service.create(CreateTaskRequest::new(body, 0)))
        .wrap_err("create task to complete")?;
    let report = run_async(world.service.complete(task.id())).wrap_err("complete task")?;
    world.last_completion = Some(report);
    Ok(())
}
