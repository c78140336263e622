//! The in-memory family calendar.
//!
//! `EventStore` is the single authoritative collection of events. It
//! is a cheap handle that can be cloned into every collaborator that
//! needs it (tools, the assistant, API handlers) so they all observe
//! and mutate the same sequence.

mod models;
pub use models::{CalendarEvent, EventPatch, NewEvent};

mod store;
pub use store::{EventStore, parse_timestamp};

pub mod seed;
