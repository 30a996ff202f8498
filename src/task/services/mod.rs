//! Application services for the task queue.

mod commands;
mod lifecycle;

pub use commands::{CommandOutcome, TaskCommand};
pub use lifecycle::{
    CompletionReport, CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService,
};
