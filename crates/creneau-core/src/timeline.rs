//! Daily appointment timelines and the free gaps between them.
//!
//! A day's timeline is the calendar's appointments for that date,
//! sorted by start time and bounded by synthetic start-of-day and
//! end-of-day entries. Every consecutive pair then yields a gap.

use chrono::{NaiveDate, NaiveDateTime};

use crate::appointment::Appointment;
use crate::workday::WorkdayConfig;

/// Build the timeline for one calendar day.
///
/// Filters `appointments` to those starting on `date`, prepends the
/// synthetic day-start entry and appends the day-end entry, then
/// stable-sorts by start time (ties keep input order).
pub fn day_timeline(
    appointments: &[Appointment],
    date: NaiveDate,
    workday: &WorkdayConfig,
) -> Vec<Appointment> {
    let mut day: Vec<Appointment> = Vec::new();
    day.push(Appointment::day_start(date, workday));
    day.extend(
        appointments
            .iter()
            .filter(|a| a.start.date() == date)
            .cloned(),
    );
    day.push(Appointment::day_end(date, workday));
    day.sort_by_key(|a| a.start);
    day
}

/// The free interval between two consecutive timeline entries.
#[derive(Debug, Clone)]
pub struct Gap {
    pub date: NaiveDate,
    pub before: Appointment,
    pub after: Appointment,
}

impl Gap {
    /// Free time in this gap, `after.start - before.end`, in seconds.
    /// Non-negative once the timeline is sorted.
    pub fn free_seconds(&self) -> i64 {
        (self.after.start - self.before.end()).num_seconds()
    }

    /// Midnight of the gap's day, the reference for offset-from-
    /// midnight configuration values.
    pub fn midnight(&self) -> NaiveDateTime {
        self.date.and_hms_opt(0, 0, 0).unwrap_or_default()
    }
}

/// Pair every consecutive timeline entry into a gap.
pub fn day_gaps(date: NaiveDate, timeline: &[Appointment]) -> Vec<Gap> {
    timeline
        .windows(2)
        .map(|pair| Gap {
            date,
            before: pair[0].clone(),
            after: pair[1].clone(),
        })
        .collect()
}
