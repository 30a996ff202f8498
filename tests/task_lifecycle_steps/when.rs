//! When steps for task lifecycle BDD scenarios.

use super::world::{TaskWorld, run_async};
use done::task::{domain::TaskId, services::CreateTaskRequest};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#"the user adds the task "{body}""#)]
fn add_task(world: &mut TaskWorld, body: String) -> Result<(), eyre::Report> {
    run_async(world.service.create(CreateTaskRequest::new(body, 0))).wrap_err("add task")?;
    Ok(())
}

#[when(r#"the user moves "{source}" onto "{destination}""#)]
fn move_task(world: &mut TaskWorld, source: String, destination: String) -> Result<(), eyre::Report> {
    let source_id = world.id_of(&source)?;
    let destination_id = world.id_of(&destination)?;
    run_async(world.service.reorder(source_id, destination_id)).wrap_err("move task")?;
    Ok(())
}

#[when(r#"the user moves an unknown task onto "{destination}""#)]
fn move_unknown_task(world: &mut TaskWorld, destination: String) -> Result<(), eyre::Report> {
    let destination_id = world.id_of(&destination)?;
    world.last_error = run_async(world.service.reorder(TaskId::new(), destination_id)).err();
    Ok(())
}

#[when(r#"the user completes "{body}""#)]
fn complete_task(world: &mut TaskWorld, body: String) -> Result<(), eyre::Report> {
    let id = world.id_of(&body)?;
    world.clock.set(crate::test_helpers::at(2026, 10, 20, 15));
    let report = run_async(world.service.complete(id)).wrap_err("complete task")?;
    world.last_completion = Some(report);
    Ok(())
}
