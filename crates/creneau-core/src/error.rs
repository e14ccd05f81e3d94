//! Core error types for creneau-core.
//!
//! This module defines the error hierarchy using thiserror so that
//! every fallible operation in the library reports a typed, printable
//! failure.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for creneau-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Calendar feed errors
    #[error("Calendar feed error: {0}")]
    Feed(#[from] FeedError),

    /// Travel-time lookup errors
    #[error("Travel estimation error: {0}")]
    Travel(#[from] TravelError),

    /// Address suggestion / geocoding errors
    #[error("Geocoding error: {0}")]
    Geocode(#[from] GeocodeError),

    /// Lookup cache errors
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Calendar-feed errors. A failed load never yields a partial
/// appointment list; the caller gets this error instead.
#[derive(Error, Debug)]
pub enum FeedError {
    /// Network failure while fetching the feed
    #[error("Failed to fetch calendar feed: {0}")]
    Fetch(String),

    /// The feed content could not be parsed
    #[error("Failed to parse calendar feed: {0}")]
    Parse(String),

    /// Local feed file could not be read
    #[error("Failed to read calendar file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Travel-time lookup errors.
#[derive(Error, Debug)]
pub enum TravelError {
    /// HTTP request failed
    #[error("Routing request failed: {0}")]
    Http(String),

    /// Response arrived but did not contain a usable route
    #[error("Malformed routing response: {0}")]
    MalformedResponse(String),

    /// A worker task panicked or was dropped before completion
    #[error("Travel-time task failed: {0}")]
    TaskFailed(String),
}

impl From<reqwest::Error> for TravelError {
    fn from(err: reqwest::Error) -> Self {
        TravelError::Http(err.to_string())
    }
}

/// Address-suggestion and geocoding errors.
#[derive(Error, Debug)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("Geocoding request failed: {0}")]
    Http(String),

    /// Response arrived but did not contain a usable result
    #[error("Malformed geocoding response: {0}")]
    MalformedResponse(String),

    /// The query matched nothing
    #[error("No result for query '{0}'")]
    NoResult(String),

    /// Required credentials are missing
    #[error("Missing API token: set {0}")]
    MissingToken(String),
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        GeocodeError::Http(err.to_string())
    }
}

/// Lookup-cache errors. Read-side corruption is never surfaced as an
/// error (a corrupt store reads as empty); these cover write failures.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Store file could not be written
    #[error("Failed to persist cache store: {0}")]
    Io(#[from] std::io::Error),

    /// Entry payload could not be serialized
    #[error("Failed to serialize cache entry: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Week number outside the ISO range for the given year
    #[error("Invalid ISO week {week} for year {year}")]
    InvalidWeek { year: i32, week: u32 },

    /// Invalid time range
    #[error("Invalid time range: end ({end}) must not precede start ({start})")]
    InvalidTimeRange {
        start: chrono::NaiveDateTime,
        end: chrono::NaiveDateTime,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
