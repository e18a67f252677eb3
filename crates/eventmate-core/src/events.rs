//! Event records as served by the Event API.
//!
//! Events are created and destroyed by the API. The client only ever changes
//! one field locally: `slot`, when a user joins an event.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Text shown for dates the API sent in a form we cannot parse.
pub const INVALID_DATE: &str = "Invalid Date";

/// A schedulable activity with remaining enrollment capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: EventDate,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub place: String,
    /// Remaining enrollment capacity.
    pub slot: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

impl Event {
    pub fn is_full(&self) -> bool {
        self.slot == 0
    }

    /// Takes one slot and returns the new remaining count.
    ///
    /// Returns `None` (and leaves the event untouched) when no slot is left.
    pub fn take_slot(&mut self) -> Option<u32> {
        let remaining = self.slot.checked_sub(1)?;
        self.slot = remaining;
        Some(remaining)
    }
}

/// Reads `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Why a join could not be applied locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinRefused {
    /// No event with that id is in the current list.
    UnknownEvent { id: String },
    /// The event has no slots left.
    Full { name: String },
}

impl fmt::Display for JoinRefused {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinRefused::UnknownEvent { id } => write!(f, "No event with id '{id}'"),
            JoinRefused::Full { name } => write!(f, "{name} has no slots left"),
        }
    }
}

impl std::error::Error for JoinRefused {}

/// Calendar date of an event.
///
/// Keeps the string the API sent next to the parsed instant so that
/// re-serializing is lossless and unparsable dates still render.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct EventDate {
    raw: String,
    parsed: Option<DateTime<Utc>>,
}

impl EventDate {
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.parsed
    }

    /// Formats the date in `tz` using a strftime pattern.
    ///
    /// The pattern must already be validated (see `config::validate_date_format`);
    /// chrono panics while displaying an invalid one.
    pub fn format_in<Tz>(&self, tz: &Tz, pattern: &str) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match self.parsed {
            Some(instant) => instant.with_timezone(tz).format(pattern).to_string(),
            None => INVALID_DATE.to_string(),
        }
    }

    /// Formats the date in the machine's local time zone.
    pub fn format_local(&self, pattern: &str) -> String {
        self.format_in(&chrono::Local, pattern)
    }
}

impl From<String> for EventDate {
    fn from(raw: String) -> Self {
        let parsed = parse_event_date(&raw);
        Self { raw, parsed }
    }
}

impl From<&str> for EventDate {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<EventDate> for String {
    fn from(date: EventDate) -> Self {
        date.raw
    }
}

/// Parses the ISO-8601 shapes the API is known to emit.
///
/// Date-only and offset-less values are taken as UTC.
fn parse_event_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(slot: u32) -> Event {
        Event {
            id: "e1".to_string(),
            name: "Rust Meetup".to_string(),
            date: EventDate::from("2024-05-12T00:00:00.000Z"),
            time: "18:00".to_string(),
            place: "Hall A".to_string(),
            slot,
            description: "Talks and pizza".to_string(),
        }
    }

    #[test]
    fn test_deserialize_uses_underscore_id() {
        let json = r#"{
            "_id": "65f0c1",
            "name": "Hackathon",
            "date": "2024-06-01",
            "time": "09:00",
            "place": "Lab 3",
            "slot": 12,
            "description": "24 hours"
        }"#;
        let parsed: Event = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.id, "65f0c1");
        assert_eq!(parsed.slot, 12);
        assert_eq!(parsed.date.raw(), "2024-06-01");
        assert!(parsed.date.instant().is_some());
    }

    #[test]
    fn test_missing_optional_text_fields_default_to_empty() {
        let parsed: Event = serde_json::from_str(r#"{"_id": "x", "slot": 1}"#).unwrap();
        assert_eq!(parsed.name, "");
        assert_eq!(parsed.description, "");
        assert_eq!(parsed.date.format_in(&Utc, "%Y"), INVALID_DATE);
    }

    #[test]
    fn test_null_text_fields_default_to_empty() {
        let json = r#"{
            "_id": "x",
            "name": null,
            "date": null,
            "time": null,
            "place": null,
            "slot": 4,
            "description": null
        }"#;
        let parsed: Event = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.name, "");
        assert_eq!(parsed.time, "");
        assert_eq!(parsed.place, "");
        assert_eq!(parsed.description, "");
        assert_eq!(parsed.slot, 4);
        assert_eq!(parsed.date.format_in(&Utc, "%Y"), INVALID_DATE);
    }

    #[test]
    fn test_negative_slot_is_rejected() {
        let result: Result<Event, _> = serde_json::from_str(r#"{"_id": "x", "slot": -1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_date_round_trips_raw_string() {
        let original = event(3);
        let json = serde_json::to_value(&original).unwrap();
        assert_eq!(json["date"], "2024-05-12T00:00:00.000Z");
        assert_eq!(json["_id"], "e1");
    }

    #[test]
    fn test_format_in_utc() {
        let date = EventDate::from("2024-05-12T18:30:00Z");
        assert_eq!(date.format_in(&Utc, "%-m/%-d/%Y"), "5/12/2024");
    }

    #[test]
    fn test_format_in_fixed_offset_crosses_midnight() {
        let date = EventDate::from("2024-05-12T23:30:00Z");
        let tz = chrono::FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(date.format_in(&tz, "%Y-%m-%d"), "2024-05-13");
    }

    #[test]
    fn test_offsetless_datetime_parses_as_utc() {
        let date = EventDate::from("2024-01-02T03:04:05");
        assert_eq!(date.format_in(&Utc, "%H:%M"), "03:04");
    }

    #[test]
    fn test_garbage_date_renders_invalid() {
        let date = EventDate::from("next tuesday");
        assert!(date.instant().is_none());
        assert_eq!(date.format_in(&Utc, "%Y"), INVALID_DATE);
    }

    #[test]
    fn test_take_slot_decrements_by_one() {
        let mut e = event(3);
        assert_eq!(e.take_slot(), Some(2));
        assert_eq!(e.slot, 2);
    }

    #[test]
    fn test_take_slot_on_full_event_is_refused() {
        let mut e = event(0);
        assert!(e.is_full());
        assert_eq!(e.take_slot(), None);
        assert_eq!(e.slot, 0);
    }

    #[test]
    fn test_join_refused_messages() {
        let unknown = JoinRefused::UnknownEvent {
            id: "zz".to_string(),
        };
        assert_eq!(unknown.to_string(), "No event with id 'zz'");
        let full = JoinRefused::Full {
            name: "Rust Meetup".to_string(),
        };
        assert_eq!(full.to_string(), "Rust Meetup has no slots left");
    }
}
