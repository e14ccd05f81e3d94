//! TOML-based workday configuration.
//!
//! Stores the scheduling parameters shared by every availability
//! search:
//! - Work-day start/end offsets
//! - Meal window and default meal duration
//! - Scheduling margin
//!
//! All values are seconds from midnight (offsets) or plain seconds
//! (durations). Configuration is stored at
//! `~/.config/creneau/config.toml` and is only mutated between runs,
//! never during a search.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

/// Workday scheduling parameters.
///
/// Serialized to/from TOML at `~/.config/creneau/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkdayConfig {
    /// Work-day start, seconds from midnight.
    #[serde(default = "default_day_start")]
    pub day_start: i64,
    /// Work-day end, seconds from midnight.
    #[serde(default = "default_day_end")]
    pub day_end: i64,
    /// Meal window start, seconds from midnight.
    #[serde(default = "default_meal_start")]
    pub meal_start: i64,
    /// Meal window end, seconds from midnight.
    #[serde(default = "default_meal_end")]
    pub meal_end: i64,
    /// Default meal break duration, seconds.
    #[serde(default = "default_meal_duration")]
    pub meal_duration: i64,
    /// Minimum buffer beyond exact feasibility, seconds.
    #[serde(default = "default_margin")]
    pub margin: i64,
}

fn default_day_start() -> i64 {
    8 * 3600
}
fn default_day_end() -> i64 {
    18 * 3600
}
fn default_meal_start() -> i64 {
    12 * 3600
}
fn default_meal_end() -> i64 {
    14 * 3600
}
fn default_meal_duration() -> i64 {
    3600
}
fn default_margin() -> i64 {
    600
}

impl Default for WorkdayConfig {
    fn default() -> Self {
        Self {
            day_start: default_day_start(),
            day_end: default_day_end(),
            meal_start: default_meal_start(),
            meal_end: default_meal_end(),
            meal_duration: default_meal_duration(),
            margin: default_margin(),
        }
    }
}

/// Returns `~/.config/creneau[-dev]/` based on CRENEAU_ENV.
///
/// Set CRENEAU_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("CRENEAU_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("creneau-dev")
    } else {
        base_dir.join("creneau")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

impl WorkdayConfig {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/creneau"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing (and returning) the default on a
    /// missing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be
    /// parsed, or if the default cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Load from disk, returning the default on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a field value as a string by key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        json.get(key).map(|v| v.to_string())
    }

    /// Set a field by key from duration text or a raw seconds value,
    /// then persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be
    /// parsed, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let seconds = match value.parse::<i64>() {
            Ok(n) => n,
            Err(_) => {
                let parsed = crate::duration::parse(value);
                if parsed == 0 && value != "0" {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: format!("cannot parse '{value}' as seconds or duration text"),
                    });
                }
                parsed
            }
        };

        match key {
            "day_start" => self.day_start = seconds,
            "day_end" => self.day_end = seconds,
            "meal_start" => self.meal_start = seconds,
            "meal_end" => self.meal_end = seconds,
            "meal_duration" => self.meal_duration = seconds,
            "margin" => self.margin = seconds,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        self.save()
    }
}
