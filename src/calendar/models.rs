use std::fmt;

use chrono::Local;
use serde::{Deserialize, Deserializer, Serialize};

use super::store::parse_timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ISO 8601
    pub start: String,
    /// ISO 8601
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} - {}  {}",
            display_time(&self.start),
            display_time(&self.end),
            self.summary
        )?;
        if let Some(location) = &self.location {
            write!(f, " @ {}", location)?;
        }
        write!(f, " [{}]", self.id)
    }
}

fn display_time(value: &str) -> String {
    parse_timestamp(value)
        .map(|ts| ts.with_timezone(&Local).format("%a %d.%m %H:%M").to_string())
        .unwrap_or_else(|| value.to_string())
}

/// An event as requested by a caller. The store assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewEvent {
    pub summary: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl NewEvent {
    pub fn into_event(self, id: String) -> CalendarEvent {
        CalendarEvent {
            id,
            summary: self.summary,
            description: self.description,
            start: self.start,
            end: self.end,
            location: self.location,
        }
    }
}

/// Partial overwrite of an existing event. Fields left as `None` are
/// not touched. The optional fields distinguish a missing key
/// (`None`) from an explicit `null` (`Some(None)`), which clears them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EventPatch {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub location: Option<Option<String>>,
}

// Only called when the key exists, so `null` becomes `Some(None)`
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(self, event: &mut CalendarEvent) {
        if let Some(summary) = self.summary {
            event.summary = summary;
        }
        if let Some(start) = self.start {
            event.start = start;
        }
        if let Some(end) = self.end {
            event.end = end;
        }
        if let Some(description) = self.description {
            event.description = description;
        }
        if let Some(location) = self.location {
            event.location = location;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dinner() -> CalendarEvent {
        NewEvent {
            summary: String::from("Aftensmad"),
            start: String::from("2025-03-01T18:00:00Z"),
            end: String::from("2025-03-01T19:00:00Z"),
            description: Some(String::from("Pasta")),
            location: None,
        }
        .into_event(String::from("evt_dinner"))
    }

    #[test]
    fn test_patch_only_touches_provided_fields() {
        let mut event = dinner();
        EventPatch {
            location: Some(Some(String::from("Odense"))),
            ..Default::default()
        }
        .apply(&mut event);

        assert_eq!(event.location.as_deref(), Some("Odense"));
        assert_eq!(event.summary, "Aftensmad");
        assert_eq!(event.description.as_deref(), Some("Pasta"));
        assert_eq!(event.start, "2025-03-01T18:00:00Z");
        assert_eq!(event.end, "2025-03-01T19:00:00Z");
    }

    #[test]
    fn test_patch_null_clears_optional_fields() {
        let mut event = dinner();
        event.location = Some(String::from("Hjemme"));
        let patch: EventPatch =
            serde_json::from_str(r#"{"description": null, "summary": "Pizza"}"#).unwrap();
        assert_eq!(patch.description, Some(None));
        assert_eq!(patch.location, None);

        patch.apply(&mut event);
        assert_eq!(event.description, None);
        assert_eq!(event.location.as_deref(), Some("Hjemme"));
        assert_eq!(event.summary, "Pizza");
    }

    #[test]
    fn test_empty_patch() {
        assert!(EventPatch::default().is_empty());
        let patch: EventPatch = serde_json::from_str(r#"{"summary":"x"}"#).unwrap();
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_event_serialization_skips_missing_optionals() {
        let json = serde_json::to_value(dinner()).unwrap();
        assert_eq!(json["id"], "evt_dinner");
        assert_eq!(json["description"], "Pasta");
        assert!(json.get("location").is_none());
    }

    #[test]
    fn test_display_falls_back_to_raw_time() {
        let mut event = dinner();
        event.start = String::from("i morgen");
        event.location = Some(String::from("Hjemme"));
        let out = event.to_string();
        assert!(out.starts_with("i morgen - "));
        assert!(out.ends_with("Aftensmad @ Hjemme [evt_dinner]"));
    }
}
