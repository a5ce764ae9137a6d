//! The list of scheduled events

use crate::event::Event;

/// A human-readable summary of an event, e.g. `"Standup - Mon Jun 03 2024 at 09:00 AM"`
pub fn summary(event: &Event) -> String {
    let date = event.date().as_naive();
    format!("{} - {} at {}", event.title(), date.format("%a %b %d %Y"), date.format("%I:%M %p"))
}

/// One summary per event, in store order.
///
/// This lists every event, whatever month is currently displayed by the calendar.
pub fn schedule_list(events: &[Event]) -> Vec<String> {
    events.iter().map(summary).collect()
}
