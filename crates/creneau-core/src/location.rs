//! Geographic locations for appointments and meeting candidates.

use serde::{Deserialize, Serialize};

/// Longitude of the default office, used when an appointment carries
/// no usable place.
pub const DEFAULT_OFFICE_LON: f64 = -1.0842812946932405;
/// Latitude of the default office.
pub const DEFAULT_OFFICE_LAT: f64 = 49.11306395733223;

/// A resolved place: display name plus WGS84 coordinates.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub lon: f64,
    pub lat: f64,
}

impl Location {
    /// Create a location from a name and coordinates.
    pub fn new(name: impl Into<String>, lon: f64, lat: f64) -> Self {
        Self {
            name: name.into(),
            lon,
            lat,
        }
    }

    /// Sentinel location for appointments without an explicit place:
    /// the worker starts and ends the day here.
    pub fn default_office() -> Self {
        Self {
            name: "Head office".to_string(),
            lon: DEFAULT_OFFICE_LON,
            lat: DEFAULT_OFFICE_LAT,
        }
    }

    /// Whether a calendar place field names a virtual meeting room
    /// rather than a physical address. Those are held at the office.
    pub fn is_virtual_place(name: &str) -> bool {
        name.to_lowercase().contains("teams")
    }

    /// Resolve an optional calendar place field, falling back to the
    /// default office for missing or virtual places.
    pub fn from_calendar_field(name: Option<&str>, lon: f64, lat: f64) -> Self {
        match name {
            Some(n) if !Self::is_virtual_place(n) => Self::new(n, lon, lat),
            _ => Self::default_office(),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (lon: {}, lat: {})", self.name, self.lon, self.lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_office_is_stable() {
        let office = Location::default_office();
        assert_eq!(office.lon, DEFAULT_OFFICE_LON);
        assert_eq!(office.lat, DEFAULT_OFFICE_LAT);
    }

    #[test]
    fn teams_places_are_virtual() {
        assert!(Location::is_virtual_place("Réunion Teams"));
        assert!(Location::is_virtual_place("TEAMS call"));
        assert!(!Location::is_virtual_place("Mairie de Bayeux"));
    }

    #[test]
    fn virtual_place_falls_back_to_office() {
        let loc = Location::from_calendar_field(Some("Teams meeting"), 2.0, 48.0);
        assert_eq!(loc, Location::default_office());

        let loc = Location::from_calendar_field(Some("Bayeux"), -0.7, 49.27);
        assert_eq!(loc.name, "Bayeux");
    }
}
