//! Deadline values and countdown arithmetic.
//!
//! A [`Deadline`] keeps the string the user entered (which is what gets
//! persisted) alongside the wall-clock time it denotes and the resolved
//! instant. [`remaining`] and [`format_remaining`] are pure: given the same
//! deadline and `now` they always produce the same result.

use super::TaskDomainError;
use chrono::{
    DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label rendered for a countdown that has reached or passed zero.
pub const EXPIRED_MARKER: &str = "expired";

/// Wall-clock formats accepted for deadlines without an explicit offset.
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Date-only form, interpreted as midnight UTC.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Point in time by which a task should be completed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Deadline {
    raw: String,
    wall_clock: NaiveDateTime,
    instant: DateTime<Utc>,
}

impl Deadline {
    /// Parses a deadline, resolving wall-clock forms in the local time zone.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyDeadline`] for blank input and
    /// [`TaskDomainError::InvalidDeadline`] when the value matches no
    /// supported format or names a local time that does not exist.
    pub fn parse(raw: &str) -> Result<Self, TaskDomainError> {
        Self::parse_in(raw, &Local)
    }

    /// Parses a deadline, resolving wall-clock forms in `tz`.
    ///
    /// Accepted forms are `YYYY-MM-DDTHH:MM[:SS[.fff]]` (a space may replace
    /// the `T`), RFC 3339 with an explicit offset, and a bare `YYYY-MM-DD`,
    /// which denotes midnight UTC. Ambiguous local times resolve to the
    /// earliest candidate.
    ///
    /// The calendar date reported by [`date_label`](Self::date_label) is the
    /// instant as seen in `tz`, so an entry carrying its own offset, or a
    /// bare date, can show a different day than the one typed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyDeadline`] for blank input and
    /// [`TaskDomainError::InvalidDeadline`] otherwise.
    pub fn parse_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Result<Self, TaskDomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyDeadline);
        }

        if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self {
                raw: trimmed.to_owned(),
                wall_clock: with_offset.with_timezone(tz).naive_local(),
                instant: with_offset.with_timezone(&Utc),
            });
        }

        if let Some(wall_clock) = parse_wall_clock(trimmed) {
            let instant = tz
                .from_local_datetime(&wall_clock)
                .earliest()
                .ok_or_else(|| TaskDomainError::InvalidDeadline(trimmed.to_owned()))?
                .with_timezone(&Utc);
            return Ok(Self {
                raw: trimmed.to_owned(),
                wall_clock,
                instant,
            });
        }

        let date = NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map_err(|_| TaskDomainError::InvalidDeadline(trimmed.to_owned()))?;
        let instant = date.and_time(NaiveTime::MIN).and_utc();
        Ok(Self {
            raw: trimmed.to_owned(),
            wall_clock: instant.with_timezone(tz).naive_local(),
            instant,
        })
    }

    /// Returns the deadline exactly as entered (after trimming).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the resolved instant.
    #[must_use]
    pub const fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// Returns the calendar date as `{day}/{month}/{year}` without padding,
    /// in the zone the deadline was parsed in.
    #[must_use]
    pub fn date_label(&self) -> String {
        self.wall_clock.format("%-d/%-m/%Y").to_string()
    }
}

fn parse_wall_clock(value: &str) -> Option<NaiveDateTime> {
    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

impl TryFrom<String> for Deadline {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Deadline> for String {
    fn from(value: Deadline) -> Self {
        value.raw
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Signed time left until `deadline`, negative once it has passed.
#[must_use]
pub fn remaining(deadline: &Deadline, now: DateTime<Utc>) -> TimeDelta {
    deadline.instant() - now
}

/// Renders a countdown as `"{h}h {m}m {s}s"`.
///
/// Hours accumulate without rolling over into days and the sub-second
/// remainder is dropped. Zero and negative durations render as
/// [`EXPIRED_MARKER`].
#[must_use]
pub fn format_remaining(remaining: TimeDelta) -> String {
    if remaining <= TimeDelta::zero() {
        return EXPIRED_MARKER.to_owned();
    }

    let hours = remaining.num_hours();
    let after_hours = remaining - TimeDelta::hours(hours);
    let minutes = after_hours.num_minutes();
    let seconds = (after_hours - TimeDelta::minutes(minutes)).num_seconds();
    format!("{hours}h {minutes}m {seconds}s")
}
