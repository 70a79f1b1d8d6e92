//! Poller configuration.
//!
//! Shaped like the consumer-facing module config: an endpoint URL, an
//! ordered list of stops, and three delays. Loaded once at startup and
//! handed to the poller whole; the core never mutates it.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::Locale;

/// Errors from loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading the file failed
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a valid JSON config
    #[error("failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// One stop to poll.
///
/// Accepts either a bare id string or an object with overrides:
/// `"3522"` and `{"id": "3522", "name": "Keskustori", "minutesFrom": 5}`
/// both deserialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopConfig {
    /// Stop id in the upstream system, without the agency prefix.
    pub id: String,

    /// Display name override; the upstream name is used when absent.
    pub name: Option<String>,

    /// Minutes to shift the departure filtering horizon into the future.
    pub minutes_from: i64,
}

impl StopConfig {
    /// Stop with no overrides.
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            minutes_from: 0,
        }
    }
}

impl<'de> Deserialize<'de> for StopConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Id(String),
            Full {
                id: String,
                #[serde(default)]
                name: Option<String>,
                #[serde(default, rename = "minutesFrom")]
                minutes_from: i64,
            },
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Id(id) => StopConfig::from_id(id),
            Raw::Full {
                id,
                name,
                minutes_from,
            } => StopConfig {
                id,
                name,
                minutes_from,
            },
        })
    }
}

/// Polling configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    /// GraphQL endpoint URL.
    #[serde(rename = "apiURL")]
    pub api_url: String,

    /// Stops to poll, in emission order.
    pub stops: Vec<StopConfig>,

    /// Delay before the first fetch cycle, in milliseconds.
    #[serde(rename = "initialLoadDelay", default = "default_initial_load_delay")]
    pub initial_load_delay_ms: u64,

    /// Steady-state delay after a fully successful cycle, in milliseconds.
    #[serde(rename = "updateInterval", default = "default_update_interval")]
    pub update_interval_ms: u64,

    /// Delay after a cycle with at least one failure, in milliseconds.
    #[serde(rename = "retryDelay", default = "default_retry_delay")]
    pub retry_delay_ms: u64,

    /// Language tag for relative-time strings.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_initial_load_delay() -> u64 {
    2_500
}

fn default_update_interval() -> u64 {
    60_000
}

fn default_retry_delay() -> u64 {
    25_000
}

fn default_language() -> String {
    "fi".to_string()
}

impl PollConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Returns the initial load delay as a Duration.
    pub fn initial_load_delay(&self) -> Duration {
        Duration::from_millis(self.initial_load_delay_ms)
    }

    /// Returns the steady-state update interval as a Duration.
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }

    /// Returns the failure retry delay as a Duration.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Returns the locale parsed from the configured language tag.
    pub fn locale(&self) -> Locale {
        Locale::parse(&self.language)
    }
}
