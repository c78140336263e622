pub mod calendar;
pub use calendar::{
    CreateEventTool, DeleteEventTool, ListEventsTool, UpdateEventTool, calendar_tools,
};
