//! Domain model for gamification state and scoring rules.

mod rules;
mod state;

pub use rules::{
    BASE_POINTS, EXTENDED_TASK_POINTS, EXTENDED_TASK_SECONDS, LONG_TASK_POINTS,
    LONG_TASK_SECONDS, ON_TIME_BONUS, POINTS_PER_LEVEL, completion_points, level_for,
    next_streak, record_completion,
};
pub use state::GamificationState;
