//! Deadline resolution from partial month/day/year input.

use super::TaskDomainError;
use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Year reserved to mean "no deadline set".
pub const SENTINEL_YEAR: i32 = 9999;

const SENTINEL_DATE: NaiveDate = match NaiveDate::from_ymd_opt(SENTINEL_YEAR, 1, 1) {
    Some(date) => date,
    None => NaiveDate::MAX,
};

/// Partial deadline as entered by the user.
///
/// Zero in any field means the field was left unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineInput {
    /// Month of the year, `1..=12`, or 0.
    pub month: u32,
    /// Day of the month, `1..=31`, or 0.
    pub day: u32,
    /// Explicit year, or 0 to infer it.
    pub year: i32,
}

impl DeadlineInput {
    /// Creates a deadline input from numeric components.
    #[must_use]
    pub const fn new(month: u32, day: u32, year: i32) -> Self {
        Self { month, day, year }
    }

    /// Returns an input with every component unset.
    #[must_use]
    pub const fn unset() -> Self {
        Self::new(0, 0, 0)
    }

    /// Returns `true` when month, day and year are all unset.
    #[must_use]
    pub const fn is_unset(self) -> bool {
        self.month == 0 && self.day == 0 && self.year == 0
    }

    /// Builds an input from raw text fields.
    ///
    /// Empty fields and the form placeholders `MM`, `DD` and `YYYY` count as
    /// unset. Any other value that fails to parse degrades to 0 with a
    /// warning instead of rejecting the command.
    #[must_use]
    pub fn from_raw(month: &str, day: &str, year: &str) -> Self {
        Self {
            month: degrade(parse_component("month", month, "MM")),
            day: degrade(parse_component("day", day, "DD")),
            year: degrade(
                parse_component("year", year, "YYYY")
                    .and_then(|value| year_from_component(year, value)),
            ),
        }
    }
}

/// Parses one raw deadline component.
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidDeadlineComponent`] when the value is
/// neither blank, the placeholder, nor a non-negative integer.
pub fn parse_component(
    component: &'static str,
    raw: &str,
    placeholder: &str,
) -> Result<u32, TaskDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == placeholder {
        return Ok(0);
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| TaskDomainError::InvalidDeadlineComponent {
            component,
            value: raw.to_owned(),
        })
}

fn year_from_component(raw: &str, value: u32) -> Result<i32, TaskDomainError> {
    i32::try_from(value).map_err(|_| TaskDomainError::InvalidDeadlineComponent {
        component: "year",
        value: raw.to_owned(),
    })
}

fn degrade<T: Default>(parsed: Result<T, TaskDomainError>) -> T {
    parsed.unwrap_or_else(|err| {
        warn!(error = %err, "using 0 for unparsable deadline component");
        T::default()
    })
}

/// Concrete task deadline.
///
/// The sentinel date 9999-01-01 stands for "no deadline".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deadline(NaiveDate);

impl Deadline {
    /// Returns the sentinel deadline meaning "no deadline set".
    #[must_use]
    pub const fn none() -> Self {
        Self(SENTINEL_DATE)
    }

    /// Wraps a concrete calendar date.
    #[must_use]
    pub const fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Resolves partial input against today's date.
    ///
    /// Without an explicit year, a month earlier than today's month rolls
    /// into next year; the day is not considered, so a day already passed in
    /// the current month stays in the current year. The year is inferred
    /// before an unset month defaults to today's month. An unset day becomes
    /// the 1st, and days past the end of the month roll into the following
    /// month.
    #[must_use]
    pub fn resolve(input: DeadlineInput, today: NaiveDate) -> Self {
        if input.is_unset() {
            return Self::none();
        }

        let year = if input.year > 0 {
            input.year
        } else if input.month < today.month() {
            today.year().saturating_add(1)
        } else {
            today.year()
        };
        let month = if input.month == 0 {
            today.month()
        } else {
            input.month
        };
        let day = input.day.max(1);

        calendar_date(year, month, day).map_or_else(Self::none, Self)
    }

    /// Returns the underlying date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// Returns `true` unless this is the sentinel.
    #[must_use]
    pub fn is_set(self) -> bool {
        self.0.year() != SENTINEL_YEAR
    }

    /// Returns midnight UTC at the start of the deadline day.
    #[must_use]
    pub fn starts_at(self) -> DateTime<Utc> {
        self.0.and_time(chrono::NaiveTime::MIN).and_utc()
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::none()
    }
}

impl std::str::FromStr for Deadline {
    type Err = TaskDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| TaskDomainError::InvalidPersistedDeadline(value.to_owned()))
    }
}

impl std::fmt::Display for Deadline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

fn calendar_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)?
        .checked_add_months(Months::new(month.checked_sub(1)?))?
        .checked_add_days(Days::new(u64::from(day.checked_sub(1)?)))
}
