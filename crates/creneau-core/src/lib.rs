//! # Creneau Core Library
//!
//! Core business logic for Creneau, a meeting-slot finder for field
//! workers: given a week's fixed appointments, it finds the free gaps,
//! estimates travel to and from a candidate location for every gap in
//! parallel, carves out a meal break where needed, filters infeasible
//! gaps and ranks the survivors by added travel time.
//!
//! ## Architecture
//!
//! - **Search Engine**: timeline construction, gap analysis,
//!   fan-out/fan-in travel lookups over a bounded worker pool, meal
//!   policy, feasibility filter and ranking
//! - **TTL Cache**: one JSON store file with per-category expiry,
//!   wrapped around every external lookup
//! - **Integrations**: provider traits plus the Mapbox Search Box and
//!   Directions clients
//! - **Feed**: the calendar-source contract and a JSON-file source
//!
//! ## Key Components
//!
//! - [`SlotFinder`]: the availability engine
//! - [`TtlCache`]: category-aware persistent lookup cache
//! - [`CachedEstimator`]: cache-wrapped travel-time estimator
//! - [`WorkdayConfig`]: work-day, meal-window and margin settings

pub mod appointment;
pub mod cache;
pub mod duration;
pub mod error;
pub mod feed;
pub mod integrations;
pub mod location;
pub mod pool;
pub mod search;
pub mod timeline;
pub mod travel;
pub mod week;
pub mod workday;

pub use appointment::Appointment;
pub use cache::TtlCache;
pub use error::{CoreError, Result};
pub use feed::{CalendarSource, JsonFileSource};
pub use integrations::{MapboxClient, PlaceDirectory};
pub use location::Location;
pub use pool::WorkerPool;
pub use search::{CandidateSlot, LegFailurePolicy, MealPlacement, SlotFinder};
pub use timeline::{day_gaps, day_timeline, Gap};
pub use travel::{CachedEstimator, TimeConstraint, TravelEstimator, TravelLeg};
pub use week::WeekDescriptor;
pub use workday::WorkdayConfig;
