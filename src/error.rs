//! Error types for scheduling operations.
//!
//! Every fallible operation in this crate returns a [`ScheduleResult`], so that
//! callers (typically a rendering layer) can tell invalid input apart from a
//! missing event and react accordingly, rather than having failures silently
//! swallowed.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::event::EventId;

/// Errors that can occur while mutating or querying a calendar.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// The (trimmed) title of an event was empty
    #[error("Event title must not be empty")]
    EmptyTitle,

    /// An event would end before it starts
    #[error("Event ends before it starts ({start} > {end})")]
    InvalidInterval {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// No stored event matches this id
    #[error("No event with id {0}")]
    NotFound(EventId),

    /// A combined date-and-time string could not be parsed
    #[error("Invalid timestamp '{0}'. Expected YYYY-MM-DDTHH:MM[:SS] or YYYY-MM-DD")]
    InvalidTimestamp(String),

    /// A date string could not be parsed
    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A time-of-day string could not be parsed
    #[error("Invalid time '{0}'. Expected HH:MM or HH:MM:SS")]
    InvalidTime(String),

    /// A form operation was attempted while no editor is open
    #[error("No editor is currently open")]
    NoEditorOpen,

    /// The draft is missing a field that is required to build an event
    #[error("Missing {0} in the event form")]
    MissingField(&'static str),
}

/// Result type alias for scheduling operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;
