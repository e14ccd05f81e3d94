//! Calendar appointments, real and synthetic.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::location::Location;
use crate::workday::WorkdayConfig;

/// Title of the synthetic appointment opening each work day.
pub const DAY_START_TITLE: &str = "Start of day";
/// Title of the synthetic appointment closing each work day.
pub const DAY_END_TITLE: &str = "End of day";

/// A fixed calendar entry: something the worker already committed to.
///
/// Two synthetic appointments bound every day's timeline (start of
/// day, end of day); they are zero-duration, sit at the default
/// office and are never shown as real events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub title: String,
    pub location: Location,
    pub start: NaiveDateTime,
    /// Duration in seconds.
    pub duration_secs: i64,
}

impl Appointment {
    pub fn new(
        title: impl Into<String>,
        location: Location,
        start: NaiveDateTime,
        duration_secs: i64,
    ) -> Self {
        Self {
            title: title.into(),
            location,
            start,
            duration_secs,
        }
    }

    /// Derived end timestamp.
    pub fn end(&self) -> NaiveDateTime {
        self.start + Duration::seconds(self.duration_secs)
    }

    /// Synthetic day-start boundary at `date + workday.day_start`.
    pub fn day_start(date: NaiveDate, workday: &WorkdayConfig) -> Self {
        Self::new(
            DAY_START_TITLE,
            Location::default_office(),
            date.and_hms_opt(0, 0, 0).unwrap_or_default() + Duration::seconds(workday.day_start),
            0,
        )
    }

    /// Synthetic day-end boundary at `date + workday.day_end`.
    pub fn day_end(date: NaiveDate, workday: &WorkdayConfig) -> Self {
        Self::new(
            DAY_END_TITLE,
            Location::default_office(),
            date.and_hms_opt(0, 0, 0).unwrap_or_default() + Duration::seconds(workday.day_end),
            0,
        )
    }

    /// Whether this is one of the synthetic day boundaries.
    pub fn is_boundary(&self) -> bool {
        self.duration_secs == 0 && (self.title == DAY_START_TITLE || self.title == DAY_END_TITLE)
    }
}

impl std::fmt::Display for Appointment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {} : {} - {}, at {}",
            self.title,
            self.start.format("%A %d %b %Y"),
            self.start.format("%H:%M"),
            self.end().format("%H:%M"),
            self.location.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn end_is_start_plus_duration() {
        let start = date(2025, 12, 8).and_hms_opt(9, 0, 0).unwrap();
        let appt = Appointment::new("Visit", Location::default_office(), start, 5400);
        assert_eq!(appt.end(), date(2025, 12, 8).and_hms_opt(10, 30, 0).unwrap());
    }

    #[test]
    fn boundaries_are_zero_duration_at_office() {
        let workday = WorkdayConfig::default();
        let open = Appointment::day_start(date(2025, 12, 8), &workday);
        let close = Appointment::day_end(date(2025, 12, 8), &workday);

        assert!(open.is_boundary());
        assert!(close.is_boundary());
        assert_eq!(open.start, date(2025, 12, 8).and_hms_opt(8, 0, 0).unwrap());
        assert_eq!(close.start, date(2025, 12, 8).and_hms_opt(18, 0, 0).unwrap());
        assert_eq!(open.location, Location::default_office());
        assert_eq!(open.start, open.end());
    }
}
