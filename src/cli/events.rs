use crate::calendar::{CalendarEvent, EventStore};

pub fn print_events(events: &[CalendarEvent]) {
    if events.is_empty() {
        println!("Ingen planlagte begivenheder.");
        return;
    }
    println!("{} kommende aftaler", events.len());
    for event in events {
        println!("  {}", event);
    }
}

pub fn run() {
    print_events(&EventStore::with_seed().list());
}
