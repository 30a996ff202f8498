//! Scoring and streak rules applied on each completion.

use super::GamificationState;
use crate::task::domain::Task;
use chrono::{DateTime, Utc};

/// Points for any completed task.
pub const BASE_POINTS: u32 = 10;

/// Estimate above which a task counts as long.
pub const LONG_TASK_SECONDS: u64 = 3600;

/// Points for a long task.
pub const LONG_TASK_POINTS: u32 = 25;

/// Estimate above which a task counts as extended.
pub const EXTENDED_TASK_SECONDS: u64 = 7200;

/// Points for an extended task.
pub const EXTENDED_TASK_POINTS: u32 = 50;

/// Bonus for finishing before a real deadline.
pub const ON_TIME_BONUS: u32 = 10;

/// Points needed per level.
pub const POINTS_PER_LEVEL: u64 = 100;

/// Points earned by completing `task` at `now`.
///
/// The estimate thresholds are checked in turn and the later one
/// overwrites: tiers do not add up.
#[must_use]
pub fn completion_points(task: &Task, now: DateTime<Utc>) -> u32 {
    let mut points = BASE_POINTS;
    if task.estimated_seconds() > LONG_TASK_SECONDS {
        points = LONG_TASK_POINTS;
    }
    if task.estimated_seconds() > EXTENDED_TASK_SECONDS {
        points = EXTENDED_TASK_POINTS;
    }

    let deadline = task.deadline();
    if deadline.is_set() && now < deadline.starts_at() {
        points += ON_TIME_BONUS;
    }
    points
}

/// Level for a point total: one level per [`POINTS_PER_LEVEL`], from 1.
#[must_use]
#[expect(
    clippy::integer_division,
    reason = "levels are whole multiples of POINTS_PER_LEVEL"
)]
pub fn level_for(total_points: u64) -> u32 {
    u32::try_from(total_points / POINTS_PER_LEVEL)
        .unwrap_or(u32::MAX)
        .saturating_add(1)
}

/// Streak after a completion at `now`, given the previous completion.
///
/// Days are compared as UTC calendar dates. The same day keeps the streak,
/// the next day extends it, and any other gap (including a clock that went
/// backwards) restarts it at 1.
#[must_use]
pub fn next_streak(current: u32, last_completion: Option<DateTime<Utc>>, now: DateTime<Utc>) -> u32 {
    let Some(last) = last_completion else {
        return 1;
    };
    match now
        .date_naive()
        .signed_duration_since(last.date_naive())
        .num_days()
    {
        0 => current,
        1 => current.saturating_add(1),
        _ => 1,
    }
}

/// Applies one completion to the gamification record.
#[must_use]
pub fn record_completion(
    task: &Task,
    mut state: GamificationState,
    now: DateTime<Utc>,
) -> GamificationState {
    let points = completion_points(task, now);
    state.total_points = state.total_points.saturating_add(u64::from(points));
    state.completed_count = state.completed_count.saturating_add(1);
    if state.first_completion_date.is_none() {
        state.first_completion_date = Some(now);
    }
    state.current_streak = next_streak(state.current_streak, state.last_completion_date, now);
    state.longest_streak = state.longest_streak.max(state.current_streak);
    state.last_completion_date = Some(now);
    state
}
