pub mod cache;
pub mod config;
pub mod search;
pub mod suggest;

use creneau_core::{TtlCache, WorkdayConfig};
use std::path::PathBuf;

/// Path of the shared lookup-cache store.
pub fn cache_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    Ok(creneau_core::workday::data_dir()?.join("lookup_cache.json"))
}

/// Open the shared lookup cache.
pub fn open_cache() -> Result<TtlCache, Box<dyn std::error::Error>> {
    Ok(TtlCache::open(cache_path()?))
}

/// Load the workday configuration, creating defaults on first run.
pub fn load_workday() -> WorkdayConfig {
    WorkdayConfig::load_or_default()
}
