//! The aggregate gamification record.

use super::level_for;
use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;

/// Aggregate points, streak and achievement record.
///
/// Field names on the wire follow the historical JSON layout
/// (`completed_tasks`, `first_task_date`, ...). Missing, `null` or
/// wrongly typed fields (a negative point total, a date that is not
/// RFC 3339) read as their defaults. The level is always derived from
/// [`Self::total_points`]: it is written out for display but ignored on
/// read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GamificationState {
    /// Points earned across all completions.
    #[serde(deserialize_with = "lenient")]
    pub total_points: u64,
    /// Number of completed tasks.
    #[serde(rename = "completed_tasks", deserialize_with = "lenient")]
    pub completed_count: u64,
    /// Consecutive calendar days with a completion, ending at the last one.
    #[serde(deserialize_with = "lenient")]
    pub current_streak: u32,
    /// Best streak ever reached.
    #[serde(deserialize_with = "lenient")]
    pub longest_streak: u32,
    /// Time of the most recent completion.
    #[serde(deserialize_with = "lenient")]
    pub last_completion_date: Option<DateTime<Utc>>,
    /// Time of the first completion.
    #[serde(rename = "first_task_date", deserialize_with = "lenient")]
    pub first_completion_date: Option<DateTime<Utc>>,
    /// Unlocked achievement identifiers.
    #[serde(deserialize_with = "lenient")]
    pub achievements: BTreeSet<String>,
}

impl GamificationState {
    /// Returns the level implied by the current point total.
    #[must_use]
    pub fn level(&self) -> u32 {
        level_for(self.total_points)
    }

    /// Records an achievement. Returns `false` if it was already unlocked.
    pub fn unlock(&mut self, achievement: impl Into<String>) -> bool {
        self.achievements.insert(achievement.into())
    }
}

#[derive(Serialize)]
struct GamificationRecord<'a> {
    total_points: u64,
    current_streak: u32,
    longest_streak: u32,
    last_completion_date: Option<&'a DateTime<Utc>>,
    level: u32,
    completed_tasks: u64,
    first_task_date: Option<&'a DateTime<Utc>>,
    achievements: &'a BTreeSet<String>,
}

impl Serialize for GamificationState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        GamificationRecord {
            total_points: self.total_points,
            current_streak: self.current_streak,
            longest_streak: self.longest_streak,
            last_completion_date: self.last_completion_date.as_ref(),
            level: self.level(),
            completed_tasks: self.completed_count,
            first_task_date: self.first_completion_date.as_ref(),
            achievements: &self.achievements,
        }
        .serialize(serializer)
    }
}

/// A field value, or whatever stood in its place.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Valid(T),
    Invalid(IgnoredAny),
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(match Lenient::<T>::deserialize(deserializer)? {
        Lenient::Valid(value) => value,
        Lenient::Invalid(IgnoredAny) => T::default(),
    })
}
