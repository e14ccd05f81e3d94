//! The availability search engine.
//!
//! For each weekday of the requested week: build the day's timeline,
//! take every consecutive pair as a gap, and submit both travel legs
//! for every gap to the worker pool before awaiting any result
//! (fan-out). A barrier join then collects the full result set, after
//! which slots are built, filtered and ranked. Wall-clock latency is
//! bounded by the slowest single lookup under the pool's ceiling, not
//! by the sum of lookups.

pub mod meal;
pub mod slot;

use chrono::Duration;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::appointment::Appointment;
use crate::error::{CoreError, TravelError};
use crate::location::Location;
use crate::pool::WorkerPool;
use crate::timeline::{day_gaps, day_timeline, Gap};
use crate::travel::{Direction, TimeConstraint, TravelEstimate, TravelEstimator, TravelLeg};
use crate::week::WeekDescriptor;
use crate::workday::WorkdayConfig;

pub use meal::{plan_meal, MealPlacement};
pub use slot::{build_slot, cmp_added_travel, rank, CandidateSlot};

/// Buffer between an appointment boundary and the adjacent travel
/// leg: depart 5 minutes after the previous appointment ends, arrive
/// 5 minutes before the next one starts.
pub const LEG_BUFFER_SECS: i64 = 300;

/// What to do when a travel lookup fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegFailurePolicy {
    /// Substitute a zero-cost leg and log a warning. Biases results
    /// toward appearing more available than reality.
    #[default]
    DegradeToZero,
    /// Surface the failure and abort the whole search.
    Abort,
}

/// Convert fractional seconds into a chrono duration at millisecond
/// resolution.
pub(crate) fn duration_from_secs_f64(secs: f64) -> Duration {
    Duration::milliseconds((secs * 1000.0).round() as i64)
}

/// The availability engine. Both the estimator and the pool are
/// injected; their lifecycles belong to the host application.
pub struct SlotFinder {
    estimator: Arc<dyn TravelEstimator>,
    pool: Arc<WorkerPool>,
    failure_policy: LegFailurePolicy,
}

type LegHandle = JoinHandle<Result<TravelEstimate, TravelError>>;

impl SlotFinder {
    pub fn new(estimator: Arc<dyn TravelEstimator>, pool: Arc<WorkerPool>) -> Self {
        Self {
            estimator,
            pool,
            failure_policy: LegFailurePolicy::default(),
        }
    }

    pub fn with_failure_policy(mut self, policy: LegFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Find every feasible meeting slot of `meeting_secs` at `target`
    /// during `week`, given the caller's calendar. Returns slots
    /// sorted ascending by added travel; the head is the best.
    ///
    /// The calendar is a read-only snapshot; the engine never mutates
    /// caller state.
    pub async fn find_slots(
        &self,
        appointments: &[Appointment],
        target: &Location,
        week: WeekDescriptor,
        meeting_secs: i64,
        workday: &WorkdayConfig,
    ) -> Result<Vec<CandidateSlot>, CoreError> {
        let mut gaps: Vec<Gap> = Vec::new();
        let mut handles: Vec<(LegHandle, LegHandle)> = Vec::new();

        // Fan-out: submit both legs for every gap of the whole week
        // before awaiting anything.
        for date in week.weekdays()? {
            let timeline = day_timeline(appointments, date, workday);
            for gap in day_gaps(date, &timeline) {
                let outbound = self.submit_leg(
                    gap.before.location.clone(),
                    target.clone(),
                    TimeConstraint::DepartAt(gap.before.end() + Duration::seconds(LEG_BUFFER_SECS)),
                );
                let ret = self.submit_leg(
                    target.clone(),
                    gap.after.location.clone(),
                    TimeConstraint::ArriveBy(gap.after.start - Duration::seconds(LEG_BUFFER_SECS)),
                );
                gaps.push(gap);
                handles.push((outbound, ret));
            }
        }

        // Fan-in: the barrier. Nothing downstream runs on partial
        // results.
        let mut legs: Vec<(TravelLeg, TravelLeg)> = Vec::with_capacity(handles.len());
        for ((outbound, ret), gap) in handles.into_iter().zip(&gaps) {
            let outbound = self
                .resolve_leg(Direction::Outbound, outbound.await, gap)?;
            let ret = self.resolve_leg(Direction::Return, ret.await, gap)?;
            legs.push((outbound, ret));
        }

        let mut slots = Vec::new();
        for (gap, (outbound, ret)) in gaps.iter().zip(legs) {
            let (meal_secs, placement) = plan_meal(
                gap,
                outbound.duration_secs,
                ret.duration_secs,
                meeting_secs,
                workday,
            );
            if let Some(candidate) = build_slot(
                gap,
                outbound,
                ret,
                meal_secs,
                placement,
                meeting_secs,
                workday.margin,
            ) {
                slots.push(candidate);
            }
        }

        rank(&mut slots);
        Ok(slots)
    }

    fn submit_leg(&self, from: Location, to: Location, when: TimeConstraint) -> LegHandle {
        let estimator = Arc::clone(&self.estimator);
        self.pool.submit(move || estimator.estimate(&from, &to, when))
    }

    /// Apply the failure policy to one joined leg result and inflate
    /// the raw estimate by the safety factor.
    fn resolve_leg(
        &self,
        direction: Direction,
        joined: Result<Result<TravelEstimate, TravelError>, tokio::task::JoinError>,
        gap: &Gap,
    ) -> Result<TravelLeg, CoreError> {
        let outcome = match joined {
            Ok(outcome) => outcome,
            Err(e) => Err(TravelError::TaskFailed(e.to_string())),
        };

        match outcome {
            Ok(estimate) => Ok(TravelLeg::from_estimate(direction, estimate)),
            Err(e) => match self.failure_policy {
                LegFailurePolicy::DegradeToZero => {
                    tracing::warn!(
                        date = %gap.date,
                        ?direction,
                        error = %e,
                        "travel lookup failed, substituting zero-cost leg"
                    );
                    Ok(TravelLeg::zero(direction))
                }
                LegFailurePolicy::Abort => Err(e.into()),
            },
        }
    }
}
