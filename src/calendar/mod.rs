pub mod event_calendar;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// One selectable entry of a time picker: a time of day, and whether it is
/// already covered by a stored event (and should be rendered as disabled).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotOption {
    pub time: NaiveTime,
    pub busy: bool,
}
