//! Support for library configuration options

use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;

/// The step, in minutes, between two consecutive entries of a slot-option list
/// (see [`slot_options`](crate::traits::EventStore::slot_options)).
/// Feel free to override it when initing this library.
pub static SLOT_STEP_MINUTES: Lazy<Arc<Mutex<u32>>> = Lazy::new(|| Arc::new(Mutex::new(30)));

/// The current slot step, clamped to a sane divisor of a day.
pub(crate) fn slot_step_minutes() -> u32 {
    let step = *SLOT_STEP_MINUTES.lock().unwrap();
    if step == 0 || step > 24 * 60 {
        log::warn!("Invalid slot step of {} minutes, falling back to 30", step);
        return 30;
    }
    step
}
