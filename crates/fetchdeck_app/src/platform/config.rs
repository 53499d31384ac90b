//! Optional RON configuration file.

use std::fs;
use std::path::Path;
use std::time::Duration;

use fetchdeck_core::{OverlapPolicy, StateSettings, MIN_QUERY_CHARS};
use fetchdeck_engine::{ApiConfig, FetchSettings, DEFAULT_SEARCH_DELAY};
use fetchdeck_logging::{deck_info, deck_warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(String),
}

/// Every field is optional in the file; absent ones keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub resource_timeout_ms: u64,
    pub search_delay_ms: u64,
    pub min_query_chars: usize,
    pub overlap_policy: OverlapPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            api: ApiConfig::default(),
            connect_timeout_ms: millis(fetch.connect_timeout),
            request_timeout_ms: millis(fetch.request_timeout),
            resource_timeout_ms: millis(fetch.resource_timeout),
            search_delay_ms: millis(DEFAULT_SEARCH_DELAY),
            min_query_chars: MIN_QUERY_CHARS,
            overlap_policy: OverlapPolicy::default(),
        }
    }
}

impl AppConfig {
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            resource_timeout: Duration::from_millis(self.resource_timeout_ms),
            ..FetchSettings::default()
        }
    }

    pub fn state_settings(&self) -> StateSettings {
        StateSettings {
            overlap_policy: self.overlap_policy,
            min_query_chars: self.min_query_chars,
        }
    }

    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_delay_ms)
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

pub(crate) fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    ron::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))
}

/// Load `path` if given; any failure is logged and yields defaults.
pub(crate) fn load_or_default(path: Option<&Path>) -> AppConfig {
    let Some(path) = path else {
        return AppConfig::default();
    };
    match load_config(path) {
        Ok(config) => {
            deck_info!("Loaded config from {:?}", path);
            config
        }
        Err(ConfigError::Read(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            deck_warn!("Config file {:?} not found; using defaults", path);
            AppConfig::default()
        }
        Err(err) => {
            deck_warn!("Ignoring config {:?}: {}", path, err);
            AppConfig::default()
        }
    }
}
