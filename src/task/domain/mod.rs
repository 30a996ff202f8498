//! Domain model for the task queue.
//!
//! Holds the task aggregate together with the pure rules that act on it:
//! body text normalization, deadline resolution and queue ordering. Nothing
//! here touches storage or the clock directly; callers pass both in.

mod body;
mod deadline;
mod error;
mod ids;
pub mod ordering;
mod task;

pub use body::{APOSTROPHE_MARKER, NEWLINE_MARKER, QUOTE_MARKER, normalize_body};
pub use deadline::{Deadline, DeadlineInput, SENTINEL_YEAR, parse_component};
pub use error::{OrderingError, TaskDomainError};
pub use ids::TaskId;
pub use ordering::Reposition;
pub use task::{PersistedTaskData, Task};
