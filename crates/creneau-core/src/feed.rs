//! Calendar feed contract and a JSON-file source.
//!
//! Feed ingestion is a collaborator, not part of the engine: the
//! engine consumes an ordered appointment list and never sees partial
//! results. `CalendarSource` is the seam; `JsonFileSource` is the
//! bundled implementation reading a JSON export.

use chrono::NaiveDateTime;
use serde::Deserialize;
use std::path::PathBuf;

use crate::appointment::Appointment;
use crate::duration;
use crate::error::FeedError;
use crate::location::Location;

/// Produces the full appointment list or fails fast. Implementations
/// must never return partial results.
pub trait CalendarSource {
    fn load(&self) -> Result<Vec<Appointment>, FeedError>;
}

/// Duration field as it appears in feed records: raw seconds or
/// codec text such as "1h30".
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DurationField {
    Seconds(i64),
    Text(String),
}

impl DurationField {
    fn into_seconds(self) -> i64 {
        match self {
            DurationField::Seconds(s) => s,
            DurationField::Text(t) => duration::parse(&t),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PlaceRecord {
    name: String,
    lon: f64,
    lat: f64,
}

#[derive(Debug, Deserialize)]
struct AppointmentRecord {
    #[serde(default = "untitled")]
    title: String,
    start: NaiveDateTime,
    duration: DurationField,
    #[serde(default)]
    location: Option<PlaceRecord>,
}

fn untitled() -> String {
    "Untitled appointment".to_string()
}

/// Calendar source backed by a JSON array of appointment records.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CalendarSource for JsonFileSource {
    fn load(&self) -> Result<Vec<Appointment>, FeedError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| FeedError::ReadFailed {
            path: self.path.clone(),
            source: e,
        })?;
        let records: Vec<AppointmentRecord> =
            serde_json::from_str(&content).map_err(|e| FeedError::Parse(e.to_string()))?;

        let mut appointments: Vec<Appointment> = records
            .into_iter()
            .map(|r| {
                let location = match r.location {
                    Some(p) => Location::from_calendar_field(Some(&p.name), p.lon, p.lat),
                    None => Location::default_office(),
                };
                Appointment::new(r.title, location, r.start, r.duration.into_seconds())
            })
            .collect();
        appointments.sort_by_key(|a| a.start);
        Ok(appointments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_feed(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_sorted_appointments() {
        let file = write_feed(
            r#"[
                {"title": "Later", "start": "2025-12-08T15:00:00", "duration": 3600,
                 "location": {"name": "Bayeux", "lon": -0.7, "lat": 49.27}},
                {"title": "Earlier", "start": "2025-12-08T09:00:00", "duration": "1h30"}
            ]"#,
        );

        let appointments = JsonFileSource::new(file.path()).load().unwrap();
        assert_eq!(appointments.len(), 2);
        assert_eq!(appointments[0].title, "Earlier");
        assert_eq!(appointments[0].duration_secs, 5400);
        assert_eq!(appointments[0].location, Location::default_office());
        assert_eq!(appointments[1].location.name, "Bayeux");
    }

    #[test]
    fn virtual_places_land_at_the_office() {
        let file = write_feed(
            r#"[{"title": "Call", "start": "2025-12-08T09:00:00", "duration": 1800,
                 "location": {"name": "Teams - weekly", "lon": 0.0, "lat": 0.0}}]"#,
        );
        let appointments = JsonFileSource::new(file.path()).load().unwrap();
        assert_eq!(appointments[0].location, Location::default_office());
    }

    #[test]
    fn malformed_feed_fails_without_partial_results() {
        let file = write_feed(r#"[{"title": "Broken"}]"#);
        let result = JsonFileSource::new(file.path()).load();
        assert!(matches!(result, Err(FeedError::Parse(_))));
    }

    #[test]
    fn missing_file_is_a_read_failure() {
        let result = JsonFileSource::new("/nonexistent/feed.json").load();
        assert!(matches!(result, Err(FeedError::ReadFailed { .. })));
    }
}
