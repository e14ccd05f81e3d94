//! TTL-keyed lookup cache.
//!
//! A generic persistent key/value store shielding external lookups
//! (address suggestion, geocoding, driving time) from repeated calls.
//! Keys are category-prefixed (`"driving:..."`); each category carries
//! its own time-to-live. The whole store lives in one JSON file and a
//! single lock serializes every load-check-mutate-save cycle, so the
//! file is the unit of atomicity, not individual keys.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::CacheError;

/// Default TTL for address-suggestion entries: 10 days.
pub const SUGGESTIONS_TTL: i64 = 10 * 24 * 3600;
/// Default TTL for geocoding entries: 30 days.
pub const GEOCODE_TTL: i64 = 30 * 24 * 3600;
/// Default TTL for driving-time entries: 3 days.
pub const DRIVING_TTL: i64 = 3 * 24 * 3600;

/// One cached value with its write timestamp (unix seconds).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    ts: i64,
    value: serde_json::Value,
}

type Store = HashMap<String, CacheEntry>;

/// Category-aware, time-expiring persistent key-value store.
///
/// Shared process-wide behind an `Arc`; its internal lock makes
/// concurrent searches safe (they compete for the same lock and
/// file).
pub struct TtlCache {
    path: PathBuf,
    ttl_by_category: HashMap<String, i64>,
    lock: Mutex<()>,
}

impl TtlCache {
    /// Open a cache backed by `path` with the default category TTLs.
    /// The file is created lazily on first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut ttl_by_category = HashMap::new();
        ttl_by_category.insert("suggestions".to_string(), SUGGESTIONS_TTL);
        ttl_by_category.insert("geocode".to_string(), GEOCODE_TTL);
        ttl_by_category.insert("driving".to_string(), DRIVING_TTL);

        Self {
            path: path.into(),
            ttl_by_category,
            lock: Mutex::new(()),
        }
    }

    /// Override or add a category TTL (seconds).
    pub fn with_ttl(mut self, category: impl Into<String>, ttl_secs: i64) -> Self {
        self.ttl_by_category.insert(category.into(), ttl_secs);
        self
    }

    /// Look up a key. Returns the stored payload or a miss.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());
        let store = self.load();
        store.get(key).map(|entry| entry.value.clone())
    }

    /// Upsert a key.
    ///
    /// Sweeps expired entries first, then writes the whole store
    /// atomically (temp file + rename) so a crash mid-write never
    /// corrupts it.
    pub fn set(&self, key: &str, value: serde_json::Value) -> Result<(), CacheError> {
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());
        let mut store = self.load();
        self.sweep(&mut store);
        store.insert(
            key.to_string(),
            CacheEntry {
                ts: Utc::now().timestamp(),
                value,
            },
        );
        self.save(&store)
    }

    /// Number of live entries per category.
    pub fn stats(&self) -> HashMap<String, usize> {
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());
        let store = self.load();
        let mut counts: HashMap<String, usize> = HashMap::new();
        for key in store.keys() {
            *counts.entry(category_of(key).to_string()).or_default() += 1;
        }
        counts
    }

    /// Drop every entry and remove the store file.
    pub fn clear(&self) -> Result<(), CacheError> {
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::Io(e)),
        }
    }

    /// A corrupt or unreadable store reads as empty (cold start).
    fn load(&self) -> Store {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Store::default(),
        }
    }

    fn save(&self, store: &Store) -> Result<(), CacheError> {
        let tmp = self.path.with_extension("tmp");
        let content = serde_json::to_string(store)?;
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Remove entries older than their category TTL. Entries in an
    /// unknown category never expire.
    fn sweep(&self, store: &mut Store) {
        let now = Utc::now().timestamp();
        store.retain(|key, entry| match self.ttl_by_category.get(category_of(key)) {
            Some(ttl) => now - entry.ts <= *ttl,
            None => true,
        });
    }
}

/// The category is the key prefix before the first `:`.
fn category_of(key: &str) -> &str {
    key.split(':').next().unwrap_or(key)
}
