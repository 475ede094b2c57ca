use chrono::NaiveDateTime;

use crate::calendar::SlotOption;
use crate::error::ScheduleResult;
use crate::event::{Event, EventId};
use crate::slot::Slot;

/// The contract between the scheduling core and whatever renders it.
///
/// A rendering layer only ever needs these operations: feed user intents in
/// (add/update/delete) and read the current event list and slot availability
/// back out. Keeping the contract as a trait lets [`Session`](crate::Session)
/// be tested against lightweight stores.
pub trait EventStore {
    /// Returns the current events of this store, in insertion order
    fn events(&self) -> &[Event];

    /// Returns the event matching this id
    fn event_by_id(&self, id: &EventId) -> Option<&Event>;

    /// Append a new event; returns a reference to it (its id is freshly generated)
    fn add_event(
        &mut self,
        title: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> ScheduleResult<&Event>;

    /// Replace the fields of the event matching this id, in place.
    /// Its id and its position in the collection are preserved.
    fn update_event(
        &mut self,
        id: &EventId,
        title: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> ScheduleResult<&Event>;

    /// Remove the event matching this id. Removing an absent id is a no-op.
    fn delete_event(&mut self, id: &EventId);

    /// Whether some stored event covers this slot, optionally ignoring one
    /// event (so that an event does not block its own edit form)
    fn is_slot_busy_excluding(&self, slot: &Slot, exclude: Option<&EventId>) -> bool;

    /// The selectable times of a given day, each flagged busy or free
    fn slot_options(&self, date: chrono::NaiveDate, exclude: Option<&EventId>) -> Vec<SlotOption>;

    /// Whether some stored event covers this slot
    fn is_slot_busy(&self, slot: &Slot) -> bool {
        self.is_slot_busy_excluding(slot, None)
    }
}
