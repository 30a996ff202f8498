//! Total ordering of pending tasks.
//!
//! Order values are plain integers, lower meaning earlier in the queue.
//! Every operation here rewrites orders in place over the full pending
//! collection; callers persist the whole collection afterwards.

use super::{OrderingError, Task, TaskId};

/// Outcome of a reposition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reposition {
    /// Source and destination coincide; nothing moved.
    Unchanged,
    /// The source task moved from one order value to another.
    Moved {
        /// Order value the source task held before the move.
        from: u32,
        /// Order value the source task holds now.
        to: u32,
    },
}

/// Sorts tasks by ascending order value, keeping ties in their given order.
pub fn sort_by_order(tasks: &mut [Task]) {
    tasks.sort_by_key(Task::order);
}

/// Shifts every pending task back by one and places `task` at order 0.
pub fn insert_at_front(pending: &mut Vec<Task>, mut task: Task) {
    for existing in pending.iter_mut() {
        existing.set_order(existing.order().saturating_add(1));
    }
    task.set_order(0);
    pending.insert(0, task);
}

/// Moves `source` into the slot currently held by `destination`.
///
/// Tasks between the two slots shift by one towards the vacated slot, so
/// order values stay unique and tasks outside the range keep their relative
/// order.
///
/// # Errors
///
/// Returns [`OrderingError::UnknownTask`] when either endpoint is missing.
/// Nothing is modified in that case.
pub fn reposition(
    pending: &mut [Task],
    source: TaskId,
    destination: TaskId,
) -> Result<Reposition, OrderingError> {
    let from = order_of(pending, source)?;
    let to = order_of(pending, destination)?;
    if source == destination || from == to {
        return Ok(Reposition::Unchanged);
    }

    for task in pending.iter_mut() {
        let order = task.order();
        if task.id() == source {
            task.set_order(to);
        } else if from < to && order > from && order <= to {
            task.set_order(order - 1);
        } else if from > to && order >= to && order < from {
            task.set_order(order + 1);
        }
    }

    Ok(Reposition::Moved { from, to })
}

fn order_of(pending: &[Task], id: TaskId) -> Result<u32, OrderingError> {
    pending
        .iter()
        .find(|task| task.id() == id)
        .map(Task::order)
        .ok_or(OrderingError::UnknownTask(id))
}
