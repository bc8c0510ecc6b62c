use std::time::Duration;

use thiserror::Error;

use crate::FetchSettings;

pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";
pub const ENDPOINT_VAR: &str = "RECORDS_ENDPOINT";
pub const TIMEOUT_VAR: &str = "RECORDS_TIMEOUT_MS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid url ({value}): {message}")]
    InvalidEndpoint {
        var: &'static str,
        value: String,
        message: String,
    },
    #[error("{var} must be a positive number of milliseconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub endpoint: String,
    pub settings: FetchSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            settings: FetchSettings::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Reads `RECORDS_ENDPOINT` and `RECORDS_TIMEOUT_MS` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(ENDPOINT_VAR).filter(|v| !v.trim().is_empty()) {
            let value = value.trim().to_string();
            reqwest::Url::parse(&value).map_err(|err| ConfigError::InvalidEndpoint {
                var: ENDPOINT_VAR,
                value: value.clone(),
                message: err.to_string(),
            })?;
            config.endpoint = value;
        }

        if let Some(value) = lookup(TIMEOUT_VAR) {
            let millis = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout {
                    var: TIMEOUT_VAR,
                    value: value.clone(),
                })?;
            config.settings.request_timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }
}
