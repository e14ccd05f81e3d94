//! Travel-time estimation.
//!
//! The estimator seam between the availability engine and the routing
//! service: a blocking trait, a cache-wrapped implementation keyed by
//! rounded coordinates and minute-granularity timestamps, and the leg
//! types the engine works with.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::cache::TtlCache;
use crate::error::TravelError;
use crate::integrations::traits::RoutingProvider;
use crate::location::Location;

/// Routing estimates are treated as optimistic lower bounds; every
/// raw duration is scaled by this factor before use.
pub const SAFETY_FACTOR: f64 = 1.10;

/// Exactly one time constraint applies to each lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeConstraint {
    /// Leave the origin no earlier than this.
    DepartAt(NaiveDateTime),
    /// Reach the destination no later than this.
    ArriveBy(NaiveDateTime),
}

impl TimeConstraint {
    /// Minute-granularity rendering of the depart constraint, empty
    /// when the lookup is arrival-bound. Used in cache keys and wire
    /// parameters.
    pub fn depart_str(&self) -> String {
        match self {
            TimeConstraint::DepartAt(t) => t.format("%Y-%m-%dT%H:%M").to_string(),
            TimeConstraint::ArriveBy(_) => String::new(),
        }
    }

    /// Minute-granularity rendering of the arrive constraint, empty
    /// when the lookup is departure-bound.
    pub fn arrive_str(&self) -> String {
        match self {
            TimeConstraint::DepartAt(_) => String::new(),
            TimeConstraint::ArriveBy(t) => t.format("%Y-%m-%dT%H:%M").to_string(),
        }
    }
}

/// Raw routing result, before the safety factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelEstimate {
    pub duration_secs: f64,
    pub distance_meters: f64,
}

/// Which side of the candidate meeting a leg covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Outbound,
    Return,
}

/// A directional travel leg as the engine uses it: duration already
/// scaled by [`SAFETY_FACTOR`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelLeg {
    pub direction: Direction,
    pub duration_secs: f64,
    pub distance_meters: f64,
}

impl TravelLeg {
    /// Inflate a raw estimate into a usable leg.
    pub fn from_estimate(direction: Direction, estimate: TravelEstimate) -> Self {
        Self {
            direction,
            duration_secs: estimate.duration_secs * SAFETY_FACTOR,
            distance_meters: estimate.distance_meters,
        }
    }

    /// The zero-cost leg substituted when a lookup fails and the
    /// degrade policy is in effect.
    pub fn zero(direction: Direction) -> Self {
        Self {
            direction,
            duration_secs: 0.0,
            distance_meters: 0.0,
        }
    }
}

/// Travel-time lookup seam. Implementations block; the engine runs
/// them on its worker pool.
pub trait TravelEstimator: Send + Sync {
    /// Estimate driving time and distance between two locations under
    /// a departure or arrival constraint.
    fn estimate(
        &self,
        from: &Location,
        to: &Location,
        when: TimeConstraint,
    ) -> Result<TravelEstimate, TravelError>;
}

/// Cache key for a driving lookup: 6-decimal-rounded endpoint
/// coordinates plus the minute-granularity constraint strings.
pub fn driving_key(from: &Location, to: &Location, when: TimeConstraint) -> String {
    format!(
        "driving:{:.6},{:.6}:{:.6},{:.6}:depart={}:arrive={}",
        from.lon,
        from.lat,
        to.lon,
        to.lat,
        when.depart_str(),
        when.arrive_str()
    )
}

/// [`TravelEstimator`] wrapping a routing provider with the TTL
/// cache, making repeated lookups cheap and idempotent.
pub struct CachedEstimator {
    cache: Arc<TtlCache>,
    provider: Arc<dyn RoutingProvider>,
}

impl CachedEstimator {
    pub fn new(cache: Arc<TtlCache>, provider: Arc<dyn RoutingProvider>) -> Self {
        Self { cache, provider }
    }
}

impl TravelEstimator for CachedEstimator {
    fn estimate(
        &self,
        from: &Location,
        to: &Location,
        when: TimeConstraint,
    ) -> Result<TravelEstimate, TravelError> {
        let key = driving_key(from, to, when);

        if let Some(value) = self.cache.get(&key) {
            if let Ok(estimate) = serde_json::from_value::<TravelEstimate>(value) {
                tracing::debug!(%key, "driving cache hit");
                return Ok(estimate);
            }
        }

        let estimate = self.provider.estimate_travel(from, to, when)?;

        match serde_json::to_value(estimate) {
            Ok(value) => {
                if let Err(e) = self.cache.set(&key, value) {
                    tracing::warn!(%key, error = %e, "failed to cache driving estimate");
                }
            }
            Err(e) => tracing::warn!(%key, error = %e, "failed to encode driving estimate"),
        }

        Ok(estimate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        calls: AtomicUsize,
    }

    impl RoutingProvider for CountingProvider {
        fn estimate_travel(
            &self,
            _from: &Location,
            _to: &Location,
            _when: TimeConstraint,
        ) -> Result<TravelEstimate, TravelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(TravelEstimate {
                duration_secs: 1200.0,
                distance_meters: 18000.0,
            })
        }
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, 8)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn driving_key_discriminates_constraint_side() {
        let a = Location::new("A", -1.084281, 49.113064);
        let b = Location::new("B", -0.7, 49.27);

        let depart = driving_key(&a, &b, TimeConstraint::DepartAt(at(10, 5)));
        let arrive = driving_key(&a, &b, TimeConstraint::ArriveBy(at(10, 5)));

        assert!(depart.contains("depart=2025-12-08T10:05:arrive="));
        assert!(arrive.contains("depart=:arrive=2025-12-08T10:05"));
        assert_ne!(depart, arrive);
        assert!(depart.starts_with("driving:-1.084281,49.113064:"));
    }

    #[test]
    fn seconds_are_truncated_from_keys() {
        let a = Location::new("A", 0.0, 0.0);
        let b = Location::new("B", 1.0, 1.0);
        let t1 = at(10, 5) + chrono::Duration::seconds(10);
        let t2 = at(10, 5) + chrono::Duration::seconds(50);
        assert_eq!(
            driving_key(&a, &b, TimeConstraint::DepartAt(t1)),
            driving_key(&a, &b, TimeConstraint::DepartAt(t2))
        );
    }

    #[test]
    fn safety_factor_inflates_duration_only() {
        let leg = TravelLeg::from_estimate(
            Direction::Outbound,
            TravelEstimate {
                duration_secs: 1000.0,
                distance_meters: 5000.0,
            },
        );
        assert!((leg.duration_secs - 1100.0).abs() < 1e-9);
        assert_eq!(leg.distance_meters, 5000.0);
    }

    #[test]
    fn cached_estimator_hits_provider_once() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Arc::new(TtlCache::open(dir.path().join("cache.json")));
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        let estimator = CachedEstimator::new(cache, provider.clone());

        let a = Location::new("A", -1.08, 49.11);
        let b = Location::new("B", -0.7, 49.27);
        let when = TimeConstraint::DepartAt(at(10, 5));

        let first = estimator.estimate(&a, &b, when).unwrap();
        let second = estimator.estimate(&a, &b, when).unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }
}
