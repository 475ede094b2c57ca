//! Calendar events (titled, uniquely identified busy intervals)

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::{ScheduleError, ScheduleResult};
use crate::utils::capitalize_first;

/// The unique identifier of an [`Event`] within a calendar.
///
/// Ids are opaque and immutable once assigned; they survive edits of the event
/// they identify.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EventId {
    content: Uuid,
}
impl EventId {
    /// Generate a random EventId.
    pub fn random() -> Self {
        Self {
            content: Uuid::new_v4(),
        }
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.content
    }
}
impl From<Uuid> for EventId {
    fn from(uuid: Uuid) -> Self {
        Self { content: uuid }
    }
}
impl FromStr for EventId {
    type Err = uuid::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let u: Uuid = s.parse()?;
        Ok(Self::from(u))
    }
}

impl Display for EventId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}

/// Used to support serde
impl Serialize for EventId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.content.to_hyphenated().to_string())
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D>(deserializer: D) -> Result<EventId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let u: Uuid = s.parse().map_err(serde::de::Error::custom)?;
        Ok(EventId { content: u })
    }
}

/// A calendar event: a busy period over the half-open interval `[start, end)`.
///
/// `start == end` is permitted (a zero-width event) but such an event covers no
/// timestamp at all. Bounds are naive date-times: this crate only deals with
/// the host's local representation and does not support timezones.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// The unique id of this event
    id: EventId,

    /// The display title of this event
    title: String,

    /// Inclusive lower bound of the busy interval
    start: NaiveDateTime,
    /// Exclusive upper bound of the busy interval (`start <= end` always holds)
    end: NaiveDateTime,

    /// The time this event was created
    creation_date: DateTime<Utc>,
    /// The last time this event was modified
    last_modified: DateTime<Utc>,
}

impl Event {
    /// Create a brand new Event with a fresh (random) id.
    ///
    /// The title is trimmed and gets its first letter capitalized. This is the
    /// only way to build an event, so `start <= end` holds for every `Event`
    /// that exists.
    pub fn new(title: &str, start: NaiveDateTime, end: NaiveDateTime) -> ScheduleResult<Self> {
        let title = validate_title(title)?;
        validate_interval(start, end)?;
        Ok(Self {
            id: EventId::random(),
            title,
            start,
            end,
            creation_date: Utc::now(),
            last_modified: Utc::now(),
        })
    }

    pub fn id(&self) -> &EventId {
        &self.id
    }
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }
    pub fn creation_date(&self) -> &DateTime<Utc> {
        &self.creation_date
    }
    pub fn last_modified(&self) -> &DateTime<Utc> {
        &self.last_modified
    }

    /// Whether this event's interval contains the given timestamp.
    ///
    /// The interval is half-open: the start bound is inclusive, the end bound
    /// exclusive, so back-to-back events do not both claim their shared bound.
    pub fn covers(&self, timestamp: NaiveDateTime) -> bool {
        self.start <= timestamp && timestamp < self.end
    }

    /// Whether this event's interval strictly overlaps `[start, end)`.
    ///
    /// Adjacent intervals (one ending exactly when the other starts) do not
    /// overlap. Zero-width ranges overlap nothing.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start < end && start < self.end
    }

    /// Retitle this event.
    /// This updates its "last modified" field
    pub fn set_title(&mut self, new_title: &str) -> ScheduleResult<()> {
        self.title = validate_title(new_title)?;
        self.update_last_modified();
        Ok(())
    }

    /// Move this event to a new interval.
    /// This updates its "last modified" field
    pub fn set_interval(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> ScheduleResult<()> {
        validate_interval(start, end)?;
        self.start = start;
        self.end = end;
        self.update_last_modified();
        Ok(())
    }

    fn update_last_modified(&mut self) {
        self.last_modified = Utc::now();
    }
}

/// Trim and capitalize a title, rejecting empty ones
fn validate_title(title: &str) -> ScheduleResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ScheduleError::EmptyTitle);
    }
    Ok(capitalize_first(trimmed))
}

fn validate_interval(start: NaiveDateTime, end: NaiveDateTime) -> ScheduleResult<()> {
    if start > end {
        return Err(ScheduleError::InvalidInterval { start, end });
    }
    Ok(())
}
