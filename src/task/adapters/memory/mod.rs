//! In-memory adapters for the task queue.

mod task;

pub use task::InMemoryTaskRepository;
