//! Meal-insertion policy.
//!
//! A meal break is carved out of a gap when the meeting-plus-travel
//! block on either side of the candidate meeting would overlap the
//! configured meal window.

use chrono::NaiveDateTime;

use crate::timeline::Gap;
use crate::workday::WorkdayConfig;

use super::duration_from_secs_f64;

/// Which travel leg the meal block immediately precedes. Placement is
/// cosmetic: it affects where the meal is rendered in the day, never
/// the slot's start/end math.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealPlacement {
    None,
    BeforeOutbound,
    BeforeReturn,
}

/// Positive overlap between two intervals, in seconds.
/// `max(0, min(aEnd, bEnd) - max(aStart, bStart))`.
pub fn overlap_seconds(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> i64 {
    (a_end.min(b_end) - a_start.max(b_start)).num_seconds().max(0)
}

/// Decide whether a meal must be inserted into `gap` and on which
/// side.
///
/// The two candidate windows are
/// `[before.end, before.end + outbound + meeting]` and
/// `[after.start - return - meeting, after.start]`; a meal of the
/// configured duration is inserted when either overlaps the meal
/// window, placed on the side with the larger overlap.
pub fn plan_meal(
    gap: &Gap,
    outbound_secs: f64,
    return_secs: f64,
    meeting_secs: i64,
    workday: &WorkdayConfig,
) -> (i64, MealPlacement) {
    let midnight = gap.midnight();
    let meal_start = midnight + chrono::Duration::seconds(workday.meal_start);
    let meal_end = midnight + chrono::Duration::seconds(workday.meal_end);

    let out_start = gap.before.end();
    let out_end = out_start + duration_from_secs_f64(outbound_secs + meeting_secs as f64);
    let ret_end = gap.after.start;
    let ret_start = ret_end - duration_from_secs_f64(return_secs + meeting_secs as f64);

    let out_overlap = overlap_seconds(out_start, out_end, meal_start, meal_end);
    let ret_overlap = overlap_seconds(ret_start, ret_end, meal_start, meal_end);

    if out_overlap <= 0 && ret_overlap <= 0 {
        return (0, MealPlacement::None);
    }

    let placement = if out_overlap >= ret_overlap {
        MealPlacement::BeforeOutbound
    } else {
        MealPlacement::BeforeReturn
    };
    (workday.meal_duration, placement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointment::Appointment;
    use crate::location::Location;
    use chrono::NaiveDate;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 8).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        monday().and_hms_opt(h, m, 0).unwrap()
    }

    fn gap(before_end_h: u32, after_start_h: u32) -> Gap {
        let before = Appointment::new(
            "Before",
            Location::default_office(),
            at(before_end_h - 1, 0),
            3600,
        );
        let after = Appointment::new(
            "After",
            Location::default_office(),
            at(after_start_h, 0),
            3600,
        );
        Gap {
            date: monday(),
            before,
            after,
        }
    }

    #[test]
    fn overlap_is_clamped_at_zero() {
        assert_eq!(overlap_seconds(at(8, 0), at(9, 0), at(12, 0), at(14, 0)), 0);
        assert_eq!(
            overlap_seconds(at(11, 0), at(13, 0), at(12, 0), at(14, 0)),
            3600
        );
    }

    #[test]
    fn no_meal_when_both_windows_miss() {
        let workday = WorkdayConfig::default();
        // Gap 09:00 -> 11:00; both windows end well before noon.
        let (meal, placement) = plan_meal(&gap(9, 11), 600.0, 600.0, 1800, &workday);
        assert_eq!(meal, 0);
        assert_eq!(placement, MealPlacement::None);
    }

    #[test]
    fn meal_inserted_when_outbound_side_crosses_window() {
        let workday = WorkdayConfig::default();
        // Gap 11:00 -> 17:00, 30 min travel + 1h30 meeting pushes the
        // outbound block past noon.
        let (meal, placement) = plan_meal(&gap(11, 17), 1800.0, 600.0, 5400, &workday);
        assert_eq!(meal, workday.meal_duration);
        assert_eq!(placement, MealPlacement::BeforeOutbound);
    }

    #[test]
    fn meal_placed_on_larger_overlap_side() {
        let workday = WorkdayConfig::default();
        // Gap 10:00 -> 14:00: the return-side block covers the meal
        // window, the outbound one ends before noon.
        let (meal, placement) = plan_meal(&gap(10, 14), 600.0, 3600.0, 5400, &workday);
        assert_eq!(meal, workday.meal_duration);
        assert_eq!(placement, MealPlacement::BeforeReturn);
    }
}
