//! Cache-wrapped address suggestion and geocoding.

use std::sync::Arc;

use crate::cache::TtlCache;
use crate::error::GeocodeError;
use crate::location::Location;

use super::traits::{AddressSuggestion, GeocodingProvider};

/// Cache key for a suggestion lookup: normalized query plus result
/// limit.
pub fn suggestions_key(query: &str, limit: usize) -> String {
    format!("suggestions:{}:{limit}", query.trim().to_lowercase())
}

/// Cache key for a place-id resolution.
pub fn geocode_key(place_id: &str) -> String {
    format!("geocode:{place_id}")
}

/// Address directory: a geocoding provider behind the TTL cache.
pub struct PlaceDirectory {
    cache: Arc<TtlCache>,
    provider: Arc<dyn GeocodingProvider>,
}

impl PlaceDirectory {
    pub fn new(cache: Arc<TtlCache>, provider: Arc<dyn GeocodingProvider>) -> Self {
        Self { cache, provider }
    }

    /// Suggest up to `limit` places matching `query`, cached.
    pub fn suggest(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<AddressSuggestion>, GeocodeError> {
        let key = suggestions_key(query, limit);
        if let Some(value) = self.cache.get(&key) {
            if let Ok(cached) = serde_json::from_value(value) {
                return Ok(cached);
            }
        }

        let results = self.provider.suggest(query, limit)?;
        if let Ok(value) = serde_json::to_value(&results) {
            if let Err(e) = self.cache.set(&key, value) {
                tracing::warn!(%key, error = %e, "failed to cache suggestions");
            }
        }
        Ok(results)
    }

    /// Resolve a place id to coordinates, cached.
    pub fn resolve(&self, place_id: &str) -> Result<(f64, f64), GeocodeError> {
        let key = geocode_key(place_id);
        if let Some(value) = self.cache.get(&key) {
            if let Ok(cached) = serde_json::from_value(value) {
                return Ok(cached);
            }
        }

        let coords = self.provider.resolve(place_id)?;
        if let Ok(value) = serde_json::to_value(coords) {
            if let Err(e) = self.cache.set(&key, value) {
                tracing::warn!(%key, error = %e, "failed to cache geocode result");
            }
        }
        Ok(coords)
    }

    /// Resolve free-text place name to a [`Location`] via the first
    /// suggestion.
    pub fn locate(&self, name: &str) -> Result<Location, GeocodeError> {
        let suggestion = self
            .suggest(name, 1)?
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NoResult(name.to_string()))?;
        let (lon, lat) = self.resolve(&suggestion.place_id)?;
        Ok(Location::new(name, lon, lat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        calls: AtomicUsize,
    }

    impl GeocodingProvider for CountingProvider {
        fn suggest(
            &self,
            query: &str,
            _limit: usize,
        ) -> Result<Vec<AddressSuggestion>, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if query == "nowhere" {
                return Ok(Vec::new());
            }
            Ok(vec![AddressSuggestion {
                name: query.to_string(),
                full_address: None,
                place_id: format!("id-{query}"),
            }])
        }

        fn resolve(&self, _place_id: &str) -> Result<(f64, f64), GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok((-0.7, 49.27))
        }
    }

    fn directory(dir: &tempfile::TempDir) -> (PlaceDirectory, Arc<CountingProvider>) {
        let cache = Arc::new(TtlCache::open(dir.path().join("cache.json")));
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        (PlaceDirectory::new(cache, provider.clone()), provider)
    }

    #[test]
    fn suggestions_key_normalizes_query() {
        assert_eq!(suggestions_key("  Bayeux ", 3), "suggestions:bayeux:3");
        assert_ne!(suggestions_key("bayeux", 1), suggestions_key("bayeux", 3));
    }

    #[test]
    fn repeated_lookups_hit_the_cache() {
        let dir = tempfile::tempdir().unwrap();
        let (directory, provider) = directory(&dir);

        let first = directory.suggest("bayeux", 1).unwrap();
        let second = directory.suggest("bayeux", 1).unwrap();
        assert_eq!(first, second);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

        directory.resolve("id-bayeux").unwrap();
        directory.resolve("id-bayeux").unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn locate_builds_a_location_from_the_first_suggestion() {
        let dir = tempfile::tempdir().unwrap();
        let (directory, _) = directory(&dir);

        let location = directory.locate("Bayeux").unwrap();
        assert_eq!(location.name, "Bayeux");
        assert_eq!((location.lon, location.lat), (-0.7, 49.27));
    }

    #[test]
    fn locate_fails_on_empty_suggestions() {
        let dir = tempfile::tempdir().unwrap();
        let (directory, _) = directory(&dir);
        assert!(matches!(
            directory.locate("nowhere"),
            Err(GeocodeError::NoResult(_))
        ));
    }
}
