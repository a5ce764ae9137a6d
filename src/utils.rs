//! Some utility functions

use crate::event::Event;
use crate::planner::PlannerView;

/// A debug utility that pretty-prints events, with their ids
pub fn print_events(events: &[Event]) {
    for event in events {
        let id = match event.id() {
            Some(id) => id.to_string(),
            None => "-".to_string(),
        };
        println!("    {}\t{}\t{}", id, event.date(), event.title());
    }
}

/// Print the calendar of the displayed month, then the list of every scheduled event
pub fn print_view(view: &PlannerView) {
    print!("{}", view.grid);
    println!();
    println!("Scheduled events:");
    if view.schedule.is_empty() {
        println!("    (none)");
    }
    for line in &view.schedule {
        println!("  * {}", line);
    }
}
