//! The interaction layer between a calendar view and its [`EventStore`].
//!
//! A rendering layer (a calendar widget, a modal with a title field and
//! date/time pickers) translates user gestures into the intents below:
//! selecting a range opens an "add" editor, clicking an event opens an "edit"
//! editor, and saving reconciles the draft against the store. The session owns
//! the store and a small state machine:
//!
//! ```text
//! Idle -> Editing(Add)      on select_range
//! Idle -> Editing(Edit(id)) on click_event
//! Editing -> Idle           on save (success) or cancel
//! Idle -> Idle (removal)    on delete_event (the confirm dialog is the caller's job)
//! ```
//!
//! All input arrives as the strings such widgets emit; parsing happens eagerly
//! in the draft setters so malformed dates surface as [`ScheduleError`]s
//! instead of ending up concatenated into an invalid timestamp.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::calendar::SlotOption;
use crate::error::{ScheduleError, ScheduleResult};
use crate::event::{Event, EventId};
use crate::slot::{parse_date, parse_time, parse_timestamp};
use crate::traits::EventStore;

/// Whether the open editor will create a new event or rework an existing one
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EditorMode {
    Add,
    Edit(EventId),
}

/// The form fields of the event editor, as picked so far.
///
/// The title may still be empty and the date/time fields unset while the user
/// is typing; validation of the assembled event happens on
/// [`save`](Session::save).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    title: String,
    start_date: Option<NaiveDate>,
    start_time: Option<NaiveTime>,
    end_date: Option<NaiveDate>,
    end_time: Option<NaiveTime>,
}

impl EventDraft {
    fn from_event(event: &Event) -> Self {
        Self {
            title: event.title().to_string(),
            start_date: Some(event.start().date()),
            start_time: Some(event.start().time()),
            end_date: Some(event.end().date()),
            end_time: Some(event.end().time()),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }
    pub fn start_time(&self) -> Option<NaiveTime> {
        self.start_time
    }
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }
    pub fn end_time(&self) -> Option<NaiveTime> {
        self.end_time
    }

    /// The start timestamp this draft describes. Both start fields are
    /// required to build an event.
    fn start(&self) -> ScheduleResult<NaiveDateTime> {
        let date = self.start_date.ok_or(ScheduleError::MissingField("start date"))?;
        let time = self.start_time.ok_or(ScheduleError::MissingField("start time"))?;
        Ok(date.and_time(time))
    }

    /// The end timestamp this draft describes. When the end date or time is
    /// missing, the end falls back to the start (a permitted zero-width event).
    fn end_or(&self, start: NaiveDateTime) -> NaiveDateTime {
        match (self.end_date, self.end_time) {
            (Some(date), Some(time)) => date.and_time(time),
            _ => start,
        }
    }
}

/// What the session is currently doing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionState {
    /// No editor is open
    Idle,
    /// An editor is open over a draft
    Editing { mode: EditorMode, draft: EventDraft },
}

/// A user session over an event store.
///
/// The session is generic over its store so the interaction logic can be
/// exercised against any [`EventStore`] implementation; in practice this is an
/// [`EventCalendar`](crate::EventCalendar). There is no concurrency here:
/// every intent runs to completion within a single user-triggered call.
pub struct Session<C: EventStore> {
    store: C,
    state: SessionState,
}

impl<C: EventStore> Session<C> {
    pub fn new(store: C) -> Self {
        Self {
            store,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> &C {
        &self.store
    }

    /// The current events, in insertion order, for rendering
    pub fn events(&self) -> &[Event] {
        self.store.events()
    }

    /// The draft of the open editor, if any
    pub fn draft(&self) -> Option<&EventDraft> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Editing { draft, .. } => Some(draft),
        }
    }

    /// The user selected a range on the calendar grid: open an "add" editor
    /// pre-filled from the selection.
    ///
    /// `start_str`/`end_str` are the ISO-8601-like strings calendar widgets
    /// emit (`"2024-01-01T10:00:00"`, or a bare date for all-day selections,
    /// in which case the time fields stay unset for the user to pick).
    pub fn select_range(&mut self, start_str: &str, end_str: &str) -> ScheduleResult<()> {
        let start = parse_timestamp(start_str)?;
        let end = parse_timestamp(end_str)?;
        let timed = start_str.contains('T');

        let mut draft = EventDraft::default();
        draft.start_date = Some(start.date());
        draft.end_date = Some(end.date());
        if timed {
            draft.start_time = Some(start.time());
            draft.end_time = Some(end.time());
        }
        // A stale end date never precedes the start date
        if draft.end_date < draft.start_date {
            draft.end_date = None;
            draft.end_time = None;
        }

        self.state = SessionState::Editing {
            mode: EditorMode::Add,
            draft,
        };
        Ok(())
    }

    /// The user clicked an existing event: open an "edit" editor pre-filled
    /// from its current fields.
    pub fn click_event(&mut self, id: &EventId) -> ScheduleResult<()> {
        let event = self
            .store
            .event_by_id(id)
            .ok_or_else(|| ScheduleError::NotFound(id.clone()))?;
        self.state = SessionState::Editing {
            mode: EditorMode::Edit(id.clone()),
            draft: EventDraft::from_event(event),
        };
        Ok(())
    }

    fn draft_mut(&mut self) -> ScheduleResult<&mut EventDraft> {
        match &mut self.state {
            SessionState::Idle => Err(ScheduleError::NoEditorOpen),
            SessionState::Editing { draft, .. } => Ok(draft),
        }
    }

    pub fn set_title(&mut self, title: &str) -> ScheduleResult<()> {
        self.draft_mut()?.title = title.to_string();
        Ok(())
    }

    /// Pick a start date. An end date that would now precede it is cleared,
    /// for the user to pick again.
    pub fn set_start_date(&mut self, date: &str) -> ScheduleResult<()> {
        let date = parse_date(date)?;
        let draft = self.draft_mut()?;
        draft.start_date = Some(date);
        if draft.end_date.map_or(false, |end| end < date) {
            draft.end_date = None;
            draft.end_time = None;
        }
        Ok(())
    }

    pub fn set_start_time(&mut self, time: &str) -> ScheduleResult<()> {
        let time = parse_time(time)?;
        self.draft_mut()?.start_time = Some(time);
        Ok(())
    }

    pub fn set_end_date(&mut self, date: &str) -> ScheduleResult<()> {
        let date = parse_date(date)?;
        self.draft_mut()?.end_date = Some(date);
        Ok(())
    }

    pub fn set_end_time(&mut self, time: &str) -> ScheduleResult<()> {
        let time = parse_time(time)?;
        self.draft_mut()?.end_time = Some(time);
        Ok(())
    }

    /// In edit mode, the event being edited must not block its own slots
    fn excluded_id(&self) -> Option<&EventId> {
        match &self.state {
            SessionState::Editing {
                mode: EditorMode::Edit(id),
                ..
            } => Some(id),
            _ => None,
        }
    }

    /// The selectable start times for the drafted start date, busy ones flagged
    pub fn start_slot_options(&self) -> ScheduleResult<Vec<SlotOption>> {
        let draft = self.draft().ok_or(ScheduleError::NoEditorOpen)?;
        let date = draft
            .start_date
            .ok_or(ScheduleError::MissingField("start date"))?;
        Ok(self.store.slot_options(date, self.excluded_id()))
    }

    /// The selectable end times, busy ones flagged. Falls back to the start
    /// date while no end date has been picked yet.
    pub fn end_slot_options(&self) -> ScheduleResult<Vec<SlotOption>> {
        let draft = self.draft().ok_or(ScheduleError::NoEditorOpen)?;
        let date = draft
            .end_date
            .or(draft.start_date)
            .ok_or(ScheduleError::MissingField("end date"))?;
        Ok(self.store.slot_options(date, self.excluded_id()))
    }

    /// Commit the open editor: add a new event or update the edited one in
    /// place, then return to idle.
    ///
    /// On failure (empty title, missing start, backwards interval...) the
    /// editor stays open with the draft intact, so the caller can surface the
    /// error and let the user fix the form.
    pub fn save(&mut self) -> ScheduleResult<EventId> {
        let (mode, draft) = match &self.state {
            SessionState::Idle => return Err(ScheduleError::NoEditorOpen),
            SessionState::Editing { mode, draft } => (mode.clone(), draft.clone()),
        };

        let start = draft.start()?;
        let end = draft.end_or(start);

        let id = match &mode {
            EditorMode::Add => self
                .store
                .add_event(&draft.title, start, end)?
                .id()
                .clone(),
            EditorMode::Edit(id) => self
                .store
                .update_event(id, &draft.title, start, end)?
                .id()
                .clone(),
        };

        self.state = SessionState::Idle;
        Ok(id)
    }

    /// Close the editor, discarding any pending edits. No side effects.
    pub fn cancel(&mut self) {
        self.state = SessionState::Idle;
    }

    /// Remove an event directly (the blocking "are you sure?" step is the
    /// rendering layer's responsibility; call this once the user confirmed).
    /// Removing an absent id is a no-op.
    pub fn delete_event(&mut self, id: &EventId) {
        self.store.delete_event(id);
    }

    /// Remove the event currently being edited and close the editor
    pub fn delete_edited(&mut self) -> ScheduleResult<EventId> {
        let id = match self.excluded_id() {
            None => return Err(ScheduleError::NoEditorOpen),
            Some(id) => id.clone(),
        };
        self.store.delete_event(&id);
        self.state = SessionState::Idle;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EventCalendar;

    fn session() -> Session<EventCalendar> {
        Session::new(EventCalendar::with_sample_events("work".to_string()))
    }

    #[test]
    fn select_range_opens_a_prefilled_add_editor() {
        let mut session = session();
        session
            .select_range("2024-01-02T09:00:00", "2024-01-02T09:30:00")
            .unwrap();
        let draft = session.draft().unwrap();
        assert_eq!(draft.start_date(), Some(NaiveDate::from_ymd(2024, 1, 2)));
        assert_eq!(draft.start_time(), Some(NaiveTime::from_hms(9, 0, 0)));
        assert_eq!(draft.end_time(), Some(NaiveTime::from_hms(9, 30, 0)));
        assert!(matches!(
            session.state(),
            SessionState::Editing {
                mode: EditorMode::Add,
                ..
            }
        ));
    }

    #[test]
    fn all_day_selection_leaves_times_unset() {
        let mut session = session();
        session.select_range("2024-01-02", "2024-01-03").unwrap();
        let draft = session.draft().unwrap();
        assert_eq!(draft.start_date(), Some(NaiveDate::from_ymd(2024, 1, 2)));
        assert_eq!(draft.start_time(), None);
        assert_eq!(draft.end_time(), None);
    }

    #[test]
    fn malformed_selection_is_rejected_and_stays_idle() {
        let mut session = session();
        let err = session.select_range("soon", "later").unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidTimestamp(_)));
        assert_eq!(session.state(), &SessionState::Idle);
    }

    #[test]
    fn clicking_an_unknown_event_reports_not_found() {
        let mut session = session();
        let unknown = EventId::random();
        assert_eq!(
            session.click_event(&unknown).unwrap_err(),
            ScheduleError::NotFound(unknown)
        );
    }

    #[test]
    fn form_setters_require_an_open_editor() {
        let mut session = session();
        assert_eq!(
            session.set_title("Standup").unwrap_err(),
            ScheduleError::NoEditorOpen
        );
        assert_eq!(session.save().unwrap_err(), ScheduleError::NoEditorOpen);
    }

    #[test]
    fn picking_an_earlier_start_date_clears_the_end_date() {
        let mut session = session();
        session.select_range("2024-01-05", "2024-01-05").unwrap();
        session.set_end_date("2024-01-05").unwrap();
        session.set_start_date("2024-01-08").unwrap();
        let draft = session.draft().unwrap();
        assert_eq!(draft.end_date(), None);
    }

    #[test]
    fn cancel_discards_the_draft() {
        let mut session = session();
        session.select_range("2024-01-02", "2024-01-02").unwrap();
        session.set_title("Scribbles").unwrap();
        session.cancel();
        assert_eq!(session.state(), &SessionState::Idle);
        assert_eq!(session.events().len(), 2);
    }
}
