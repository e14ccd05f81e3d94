//! ISO week handling.

use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A work week identified by year and ISO week number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekDescriptor {
    pub year: i32,
    pub week: u32,
}

impl WeekDescriptor {
    pub fn new(year: i32, week: u32) -> Self {
        Self { year, week }
    }

    /// Descriptor for the current ISO week.
    pub fn current() -> Self {
        let today = Utc::now().date_naive();
        Self {
            year: today.iso_week().year(),
            week: today.iso_week().week(),
        }
    }

    /// The Monday opening this week.
    pub fn monday(&self) -> Result<NaiveDate, ValidationError> {
        NaiveDate::from_isoywd_opt(self.year, self.week, Weekday::Mon).ok_or(
            ValidationError::InvalidWeek {
                year: self.year,
                week: self.week,
            },
        )
    }

    /// The five working dates of this week, Monday through Friday.
    pub fn weekdays(&self) -> Result<[NaiveDate; 5], ValidationError> {
        let monday = self.monday()?;
        Ok([
            monday,
            monday + Duration::days(1),
            monday + Duration::days(2),
            monday + Duration::days(3),
            monday + Duration::days(4),
        ])
    }

    /// Shift by a number of weeks (negative for past weeks), keeping
    /// year/week in sync across year boundaries.
    pub fn shifted(&self, delta_weeks: i64) -> Result<Self, ValidationError> {
        let shifted = self.monday()? + Duration::weeks(delta_weeks);
        Ok(Self {
            year: shifted.iso_week().year(),
            week: shifted.iso_week().week(),
        })
    }
}
