//! Demo data the calendar starts with.

use chrono::{DateTime, Duration, Local, NaiveTime, SecondsFormat, TimeZone, Utc};

use super::models::CalendarEvent;

// Same shape as `Date.prototype.toISOString`
fn iso(ts: DateTime<Local>) -> String {
    ts.with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn today_at(now: DateTime<Local>, hour: u32, min: u32) -> DateTime<Local> {
    NaiveTime::from_hms_opt(hour, min, 0)
        .and_then(|time| Local.from_local_datetime(&now.date_naive().and_time(time)).earliest())
        .unwrap_or(now)
}

/// Football practice today at 17:00 and a family lunch two days out.
pub fn initial_events(now: DateTime<Local>) -> Vec<CalendarEvent> {
    let lunch = now + Duration::days(2);

    vec![
        CalendarEvent {
            id: String::from("evt_1"),
            summary: String::from("Fodboldtræning (Anton)"),
            description: Some(String::from("Husk benskinner")),
            start: iso(today_at(now, 17, 0)),
            end: iso(today_at(now, 18, 30)),
            location: Some(String::from("Hallen")),
        },
        CalendarEvent {
            id: String::from("evt_2"),
            summary: String::from("Familie Frokost"),
            description: Some(String::from("Hos Mormor")),
            start: iso(lunch),
            end: iso(lunch),
            location: Some(String::from("Odense")),
        },
    ]
}
