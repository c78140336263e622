pub mod calendar;
pub use calendar::CalendarAssistant;
