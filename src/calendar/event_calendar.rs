use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::calendar::SlotOption;
use crate::error::{ScheduleError, ScheduleResult};
use crate::event::{Event, EventId};
use crate::settings;
use crate::slot::Slot;
use crate::traits::EventStore;

/// An in-memory calendar: a named, insertion-ordered collection of [`Event`]s.
///
/// This is the whole "store" of this crate. Events live in a `Vec` in the
/// order they were added; every query is a linear scan, which is perfectly
/// fine at the scale of a personal calendar (tens of events). Overlapping
/// events are allowed to coexist: adding never refuses a busy interval, the
/// conflict check only informs slot pickers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventCalendar {
    name: String,

    events: Vec<Event>,
}

impl EventCalendar {
    /// Create a new, empty calendar
    pub fn new(name: String) -> Self {
        Self {
            name,
            events: Vec::new(),
        }
    }

    /// Create a calendar pre-filled with the two sample events a freshly
    /// mounted calendar view starts from (a meeting and a workshop in early
    /// January 2024). Handy for demos and tests.
    pub fn with_sample_events(name: String) -> Self {
        let mut calendar = Self::new(name);
        let seeds = [
            ("Meeting", (1, 10), (1, 12)),
            ("Workshop", (3, 14), (3, 16)),
        ];
        for (title, (start_day, start_hour), (end_day, end_hour)) in &seeds {
            let start = NaiveDate::from_ymd(2024, 1, *start_day).and_hms(*start_hour, 0, 0);
            let end = NaiveDate::from_ymd(2024, 1, *end_day).and_hms(*end_hour, 0, 0);
            let event = Event::new(title, start, end)
                .unwrap(/* this cannot fail, the sample titles and intervals are valid */);
            calendar.events.push(event);
        }
        calendar
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Whether the half-open range `[start, end)` strictly overlaps no stored
    /// event, optionally ignoring one event id. Adjacent events do not count
    /// as overlapping.
    pub fn is_range_free(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        exclude: Option<&EventId>,
    ) -> bool {
        !self
            .events
            .iter()
            .filter(|event| Some(event.id()) != exclude)
            .any(|event| event.overlaps(start, end))
    }

}

impl EventStore for EventCalendar {
    fn events(&self) -> &[Event] {
        &self.events
    }

    fn event_by_id(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id() == id)
    }

    fn add_event(
        &mut self,
        title: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> ScheduleResult<&Event> {
        let event = Event::new(title, start, end)?;
        log::debug!(
            "Adding event '{}' [{} → {}] to calendar '{}'",
            event.title(),
            start,
            end,
            self.name
        );
        self.events.push(event);
        Ok(self.events.last().unwrap(/* we just pushed it */))
    }

    fn update_event(
        &mut self,
        id: &EventId,
        title: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> ScheduleResult<&Event> {
        let index = match self.events.iter().position(|event| event.id() == id) {
            None => return Err(ScheduleError::NotFound(id.clone())),
            Some(index) => index,
        };
        // Validate both fields before touching either, so a failed update
        // leaves the event unchanged
        let mut updated = self.events[index].clone();
        updated.set_title(title)?;
        updated.set_interval(start, end)?;
        self.events[index] = updated;
        Ok(&self.events[index])
    }

    fn delete_event(&mut self, id: &EventId) {
        let before = self.events.len();
        self.events.retain(|event| event.id() != id);
        if self.events.len() == before {
            log::debug!("Deleting absent event {}, nothing to do", id);
        }
    }

    fn is_slot_busy_excluding(&self, slot: &Slot, exclude: Option<&EventId>) -> bool {
        let timestamp = slot.timestamp();
        self.events
            .iter()
            .filter(|event| Some(event.id()) != exclude)
            .any(|event| event.covers(timestamp))
    }

    fn slot_options(&self, date: NaiveDate, exclude: Option<&EventId>) -> Vec<SlotOption> {
        let step = settings::slot_step_minutes();
        let mut options = Vec::new();
        let mut minutes = 0;
        while minutes < 24 * 60 {
            let time = NaiveTime::from_hms(minutes / 60, minutes % 60, 0);
            let slot = Slot::new(date, time);
            options.push(SlotOption {
                time,
                busy: self.is_slot_busy_excluding(&slot, exclude),
            });
            minutes += step;
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(day: u32, hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd(2024, 1, day).and_hms(hour, min, 0)
    }

    fn slot(day: u32, time: &str) -> Slot {
        Slot::from_strs(&format!("2024-01-{:02}", day), time).unwrap()
    }

    #[test]
    fn sample_calendar_has_the_two_seeds() {
        let cal = EventCalendar::with_sample_events("work".to_string());
        assert_eq!(cal.len(), 2);
        assert_eq!(cal.events()[0].title(), "Meeting");
        assert_eq!(cal.events()[1].title(), "Workshop");
    }

    #[test]
    fn added_event_is_immediately_visible() {
        let mut cal = EventCalendar::new("work".to_string());
        let id = cal
            .add_event("standup", dt(2, 9, 0), dt(2, 9, 30))
            .unwrap()
            .id()
            .clone();
        assert_eq!(cal.len(), 1);
        assert_eq!(cal.event_by_id(&id).unwrap().title(), "Standup");
        assert!(cal.is_slot_busy(&slot(2, "09:15")));
    }

    #[test]
    fn overlapping_events_may_coexist() {
        let mut cal = EventCalendar::new("work".to_string());
        cal.add_event("One", dt(1, 10, 0), dt(1, 12, 0)).unwrap();
        cal.add_event("Two", dt(1, 11, 0), dt(1, 13, 0)).unwrap();
        assert_eq!(cal.len(), 2);
    }

    #[test]
    fn update_preserves_id_and_position() {
        let mut cal = EventCalendar::with_sample_events("work".to_string());
        let id = cal.events()[0].id().clone();
        cal.update_event(&id, "Renamed meeting", dt(1, 10, 0), dt(1, 12, 0))
            .unwrap();
        assert_eq!(cal.events()[0].id(), &id);
        assert_eq!(cal.events()[0].title(), "Renamed meeting");
        assert_eq!(cal.events()[1].title(), "Workshop");
    }

    #[test]
    fn update_of_unknown_id_reports_not_found() {
        let mut cal = EventCalendar::with_sample_events("work".to_string());
        let unknown = EventId::random();
        let err = cal
            .update_event(&unknown, "Ghost", dt(1, 10, 0), dt(1, 12, 0))
            .unwrap_err();
        assert_eq!(err, ScheduleError::NotFound(unknown));
        assert_eq!(cal.len(), 2);
    }

    #[test]
    fn failed_update_leaves_the_event_unchanged() {
        let mut cal = EventCalendar::with_sample_events("work".to_string());
        let id = cal.events()[0].id().clone();
        // Valid title but backwards interval: nothing must change
        let err = cal
            .update_event(&id, "Renamed", dt(1, 12, 0), dt(1, 10, 0))
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInterval { .. }));
        assert_eq!(cal.events()[0].title(), "Meeting");
        assert_eq!(cal.events()[0].start(), dt(1, 10, 0));
    }

    #[test]
    fn delete_is_idempotent() {
        let mut cal = EventCalendar::with_sample_events("work".to_string());
        let id = cal.events()[0].id().clone();
        cal.delete_event(&id);
        assert_eq!(cal.len(), 1);
        cal.delete_event(&id);
        assert_eq!(cal.len(), 1);
    }

    #[test]
    fn deleted_interval_becomes_free() {
        let mut cal = EventCalendar::with_sample_events("work".to_string());
        assert!(cal.is_slot_busy(&slot(1, "11:00")));
        let meeting_id = cal.events()[0].id().clone();
        cal.delete_event(&meeting_id);
        assert!(!cal.is_slot_busy(&slot(1, "11:00")));
    }

    #[test]
    fn slot_bounds_are_half_open() {
        let cal = EventCalendar::with_sample_events("work".to_string());
        // Meeting is [10:00, 12:00) on Jan 1st
        assert!(cal.is_slot_busy(&slot(1, "10:00")));
        assert!(cal.is_slot_busy(&slot(1, "11:59")));
        assert!(!cal.is_slot_busy(&slot(1, "12:00")));
        assert!(!cal.is_slot_busy(&slot(1, "09:59")));
    }

    #[test]
    fn excluded_event_does_not_block_its_own_slot() {
        let cal = EventCalendar::with_sample_events("work".to_string());
        let meeting_id = cal.events()[0].id().clone();
        assert!(cal.is_slot_busy(&slot(1, "11:00")));
        assert!(!cal.is_slot_busy_excluding(&slot(1, "11:00"), Some(&meeting_id)));
        // Excluding one event must not hide the others
        assert!(cal.is_slot_busy_excluding(&slot(3, "15:00"), Some(&meeting_id)));
    }

    #[test]
    fn range_freedom_ignores_adjacency() {
        let cal = EventCalendar::with_sample_events("work".to_string());
        // Right after the meeting ends is free, overlapping it is not
        assert!(cal.is_range_free(dt(1, 12, 0), dt(1, 13, 0), None));
        assert!(!cal.is_range_free(dt(1, 11, 0), dt(1, 13, 0), None));
        // The meeting does not conflict with itself while being edited
        let meeting_id = cal.events()[0].id().clone();
        assert!(cal.is_range_free(dt(1, 10, 0), dt(1, 12, 0), Some(&meeting_id)));
    }

    #[test]
    fn slot_options_flag_busy_times() {
        let cal = EventCalendar::with_sample_events("work".to_string());
        let options = cal.slot_options(NaiveDate::from_ymd(2024, 1, 1), None);
        // Default step is 30 minutes
        assert_eq!(options.len(), 48);
        let at = |h: u32, m: u32| {
            options
                .iter()
                .find(|o| o.time == NaiveTime::from_hms(h, m, 0))
                .unwrap()
        };
        assert!(!at(9, 30).busy);
        assert!(at(10, 0).busy);
        assert!(at(11, 30).busy);
        assert!(!at(12, 0).busy);
    }

    #[test]
    fn zero_width_event_blocks_no_slot() {
        let mut cal = EventCalendar::new("work".to_string());
        cal.add_event("Ping", dt(1, 10, 0), dt(1, 10, 0)).unwrap();
        assert!(!cal.is_slot_busy(&slot(1, "10:00")));
    }

    #[test]
    fn serde_calendar() {
        let cal = EventCalendar::with_sample_events("work".to_string());
        let json = serde_json::to_string(&cal).unwrap();
        let retrieved: EventCalendar = serde_json::from_str(&json).unwrap();
        assert_eq!(cal, retrieved);
    }
}
