//! Some utility functions

use crate::Event;

/// Uppercase the first letter of a string, leaving the rest untouched.
///
/// Event titles get this treatment on creation, so that hastily typed entries
/// render consistently in a calendar view.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// A debug utility that pretty-prints an event list
pub fn print_events<'a, I>(events: I)
where
    I: IntoIterator<Item = &'a Event>,
{
    for event in events {
        print_event(event);
    }
}

pub fn print_event(event: &Event) {
    println!(
        "    [{} → {}] {}\t{}",
        event.start(),
        event.end(),
        event.title(),
        event.id()
    );
}
