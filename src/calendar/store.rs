use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use uuid::Uuid;

use super::models::{CalendarEvent, EventPatch, NewEvent};
use super::seed;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO 8601 timestamp the way a browser's `Date` would:
/// values with an offset are exact, date-times without one are local
/// time and bare dates are UTC midnight.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    parse_timestamp_in(value, &Local)
}

// Offset-less date-times resolve in `tz`. A time skipped by a DST
// change is moved forward by an hour, an ambiguous one takes the
// earlier instant.
fn parse_timestamp_in<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return tz
                .from_local_datetime(&naive)
                .earliest()
                .or_else(|| {
                    tz.from_local_datetime(&(naive + TimeDelta::hours(1)))
                        .earliest()
                })
                .map(|ts| ts.with_timezone(&Utc));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// Unparseable starts go after everything else. `sort_by_key` is
// stable so events with equal starts keep their relative order.
fn sort_by_start(events: &mut [CalendarEvent]) {
    events.sort_by_key(|event| {
        let key = parse_timestamp(&event.start);
        (key.is_none(), key)
    });
}

/// Shared handle to the calendar. Clones see the same events.
///
/// Every operation is synchronous and holds the lock only for its own
/// duration. A poisoned lock is recovered rather than propagated since
/// the sequence is re-sorted on every write and can't be left half
/// updated.
#[derive(Clone, Default)]
pub struct EventStore {
    events: Arc<RwLock<Vec<CalendarEvent>>>,
}

impl EventStore {
    pub fn new(mut events: Vec<CalendarEvent>) -> Self {
        sort_by_start(&mut events);
        Self {
            events: Arc::new(RwLock::new(events)),
        }
    }

    /// Store pre-populated with the demo family calendar.
    pub fn with_seed() -> Self {
        Self::new(seed::initial_events(Local::now()))
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<CalendarEvent>> {
        self.events.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<CalendarEvent>> {
        self.events.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// All events sorted by start.
    pub fn list(&self) -> Vec<CalendarEvent> {
        self.read().clone()
    }

    pub fn get(&self, id: &str) -> Option<CalendarEvent> {
        self.read().iter().find(|e| e.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Insert a new event and return its freshly assigned id.
    pub fn create(&self, event: NewEvent) -> String {
        let id = format!("evt_{}", Uuid::new_v4().simple());
        let mut events = self.write();
        events.push(event.into_event(id.clone()));
        sort_by_start(&mut events);
        tracing::debug!("Created event {}", id);
        id
    }

    /// Merge `patch` into the event with `id`. Returns `false` and
    /// leaves the store untouched when there is no such event.
    pub fn update(&self, id: &str, patch: EventPatch) -> bool {
        let mut events = self.write();
        let Some(event) = events.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        if patch.is_empty() {
            tracing::debug!("Empty update for event {}", id);
            return true;
        }
        patch.apply(event);
        sort_by_start(&mut events);
        tracing::debug!("Updated event {}", id);
        true
    }

    pub fn delete(&self, id: &str) -> bool {
        let mut events = self.write();
        let before = events.len();
        events.retain(|e| e.id != id);
        let removed = events.len() < before;
        if removed {
            tracing::debug!("Deleted event {}", id);
        }
        removed
    }
}
