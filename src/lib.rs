//! This crate provides an in-memory store for time-blocked calendar events.
//!
//! Events are titled, uniquely identified busy periods over half-open
//! `[start, end)` intervals, kept in a [`EventCalendar`] in insertion order.
//!
//! The calendar answers the one non-trivial question of a scheduling UI:
//! "does this candidate time slot conflict with an existing event?". A
//! rendering layer (any calendar widget) feeds user intents into a
//! [`Session`], which drives the add/edit/delete flow over an explicit state
//! machine and hands back the refreshed event list to render. \
//! There is no persistence, no networking and no concurrency here: state is
//! volatile and every operation runs to completion within a single
//! user-triggered call.

pub mod traits;

pub mod calendar;
pub use calendar::event_calendar::EventCalendar;
pub use calendar::SlotOption;
mod event;
pub use event::{Event, EventId};
mod slot;
pub use slot::Slot;
mod error;
pub use error::{ScheduleError, ScheduleResult};
pub mod session;
pub use session::Session;

pub mod settings;
pub mod utils;
