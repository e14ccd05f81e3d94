//! Candidate slots: feasibility filter, construction, ranking.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use std::cmp::Ordering;

use crate::duration;
use crate::timeline::Gap;
use crate::travel::TravelLeg;

use super::duration_from_secs_f64;
use super::meal::MealPlacement;

/// Tolerance for comparing accumulated travel durations.
pub const EPSILON: f64 = 1e-6;

/// A feasible meeting window derived from a gap after subtracting
/// travel and meal time.
///
/// `end - start` always equals the requested meeting duration;
/// `window_end` carries the latest instant the worker must leave for
/// the return leg (`after.start - return`), kept for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub window_end: NaiveDateTime,
    /// Outbound travel, seconds, post-inflation.
    pub outbound_secs: f64,
    /// Return travel, seconds, post-inflation.
    pub return_secs: f64,
    /// Meal break carved out of the gap, seconds (0 if none).
    pub meal_secs: i64,
    #[serde(skip)]
    pub meal_placement: MealPlacement,
}

impl CandidateSlot {
    /// Total travel added by this slot: outbound + return.
    pub fn added_travel_secs(&self) -> f64 {
        self.outbound_secs + self.return_secs
    }
}

impl std::fmt::Display for CandidateSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Available {} {} - {} (+{} travel)",
            self.start.format("%A %d %b %Y"),
            self.start.format("%H:%M"),
            self.end.format("%H:%M"),
            duration::format(self.added_travel_secs().round() as i64),
        )
    }
}

/// Build the candidate slot for a gap, or discard the gap when it
/// cannot fit meeting + travel + meal + margin. No partial slots.
pub fn build_slot(
    gap: &Gap,
    outbound: TravelLeg,
    ret: TravelLeg,
    meal_secs: i64,
    meal_placement: MealPlacement,
    meeting_secs: i64,
    margin_secs: i64,
) -> Option<CandidateSlot> {
    let free = gap.free_seconds() as f64;
    let required =
        meeting_secs as f64 + outbound.duration_secs + ret.duration_secs + meal_secs as f64;
    if free < required + margin_secs as f64 {
        return None;
    }

    let start =
        gap.before.end() + duration_from_secs_f64(outbound.duration_secs + meal_secs as f64);
    Some(CandidateSlot {
        start,
        end: start + Duration::seconds(meeting_secs),
        window_end: gap.after.start - duration_from_secs_f64(ret.duration_secs),
        outbound_secs: outbound.duration_secs,
        return_secs: ret.duration_secs,
        meal_secs,
        meal_placement,
    })
}

/// Epsilon equality for travel durations.
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Ascending order on added travel, with epsilon-tolerant ties.
pub fn cmp_added_travel(a: &CandidateSlot, b: &CandidateSlot) -> Ordering {
    let (ta, tb) = (a.added_travel_secs(), b.added_travel_secs());
    if approx_eq(ta, tb) {
        Ordering::Equal
    } else {
        ta.partial_cmp(&tb).unwrap_or(Ordering::Equal)
    }
}

/// Field-wise equality with epsilon tolerance on the travel and meal
/// durations.
pub fn slots_approx_eq(a: &CandidateSlot, b: &CandidateSlot) -> bool {
    a.start == b.start
        && a.end == b.end
        && approx_eq(a.outbound_secs, b.outbound_secs)
        && approx_eq(a.return_secs, b.return_secs)
        && approx_eq(a.meal_secs as f64, b.meal_secs as f64)
}

/// Sort slots ascending by added travel (stable; ties keep order).
pub fn rank(slots: &mut [CandidateSlot]) {
    slots.sort_by(cmp_added_travel);
}
