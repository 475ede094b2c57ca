//! Candidate time slots and timestamp parsing
//!
//! A [`Slot`] is a discrete candidate timestamp (a date plus a time of day)
//! that gets tested for conflict against stored events. Slots typically come
//! from a date picker and a time dropdown, so the constructors here accept the
//! string shapes such widgets emit and reject malformed input explicitly.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};

/// A candidate timestamp to be tested against a calendar's events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    date: NaiveDate,
    time: NaiveTime,
}

impl Slot {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }

    /// Build a slot from the strings a date picker and a time dropdown emit
    /// (`"2024-01-01"` and `"11:00"`).
    pub fn from_strs(date: &str, time: &str) -> ScheduleResult<Self> {
        Ok(Self {
            date: parse_date(date)?,
            time: parse_time(time)?,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// The point in time this slot designates
    pub fn timestamp(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// Parse a `YYYY-MM-DD` date string
pub fn parse_date(s: &str) -> ScheduleResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| ScheduleError::InvalidDate(s.to_string()))
}

/// Parse an `HH:MM` (or `HH:MM:SS`) time-of-day string
pub fn parse_time(s: &str) -> ScheduleResult<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| ScheduleError::InvalidTime(s.to_string()))
}

/// Parse the ISO-8601-like strings a calendar widget emits for a selection.
///
/// Timed selections look like `2024-01-01T10:00:00` (seconds optional);
/// all-day selections carry the date alone, which is taken as midnight.
pub fn parse_timestamp(s: &str) -> ScheduleResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d").map(|d| d.and_hms(0, 0, 0)))
        .map_err(|_| ScheduleError::InvalidTimestamp(s.to_string()))
}
