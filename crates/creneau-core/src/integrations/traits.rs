//! Provider seams for the external HTTP collaborators.
//!
//! The engine and the cache wrappers only see these traits; the
//! Mapbox client is one implementation. Providers block -- callers
//! decide where they run.

use serde::{Deserialize, Serialize};

use crate::error::{GeocodeError, TravelError};
use crate::location::Location;
use crate::travel::{TimeConstraint, TravelEstimate};

/// One address-suggestion result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressSuggestion {
    pub name: String,
    pub full_address: Option<String>,
    pub place_id: String,
}

/// Driving-time lookup between two resolved locations.
pub trait RoutingProvider: Send + Sync {
    fn estimate_travel(
        &self,
        from: &Location,
        to: &Location,
        when: TimeConstraint,
    ) -> Result<TravelEstimate, TravelError>;
}

/// Free-text address suggestion and place-id resolution.
pub trait GeocodingProvider: Send + Sync {
    /// Suggest up to `limit` places matching `query`.
    fn suggest(&self, query: &str, limit: usize) -> Result<Vec<AddressSuggestion>, GeocodeError>;

    /// Resolve a place id to `(lon, lat)`.
    fn resolve(&self, place_id: &str) -> Result<(f64, f64), GeocodeError>;
}
