//! Provider configuration.
//!
//! Defaults can be overridden from the environment (a `.env` file is loaded
//! by the CLI):
//! - `CLAPR_LCD_ENDPOINTS`: comma-separated REST endpoints, tried in order
//! - `CLAPR_TIMEOUT_MS`: per-request timeout in milliseconds
//! - `CLAPR_BLOCK_HEIGHT`: chain height every query is pinned to

use crate::error::ProviderError;
use std::time::Duration;

/// Public Osmosis REST endpoints from the chain registry, tried in order.
pub const DEFAULT_ENDPOINTS: [&str; 6] = [
    "https://lcd.osmosis.zone",
    "https://rest-osmosis.ecostake.com",
    "https://osmosis-api.polkachu.com",
    "https://rest.lavenderfive.com:443/osmosis",
    "https://osmosis-rest.publicnode.com",
    "https://osmosis.rest.stakin-nodes.com",
];

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 8_000;

pub const ENV_ENDPOINTS: &str = "CLAPR_LCD_ENDPOINTS";
pub const ENV_TIMEOUT_MS: &str = "CLAPR_TIMEOUT_MS";
pub const ENV_BLOCK_HEIGHT: &str = "CLAPR_BLOCK_HEIGHT";

/// Configuration for [`crate::providers::LcdProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// REST endpoints, tried in order until one answers.
    pub endpoints: Vec<String>,
    /// Timeout applied to each request.
    pub timeout: Duration,
    /// Height every query is pinned to; latest when `None`.
    pub block_height: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoints: DEFAULT_ENDPOINTS.iter().map(|e| (*e).to_string()).collect(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            block_height: None,
        }
    }
}

impl ProviderConfig {
    /// Loads the configuration from process environment variables.
    ///
    /// # Errors
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns an error if a value is present but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ProviderError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_ENDPOINTS) {
            let endpoints: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string)
                .collect();
            if endpoints.is_empty() {
                return Err(ProviderError::InvalidConfig {
                    key: ENV_ENDPOINTS,
                    value: raw,
                });
            }
            config.endpoints = endpoints;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| ProviderError::InvalidConfig {
                    key: ENV_TIMEOUT_MS,
                    value: raw.clone(),
                })?;
            config.timeout = Duration::from_millis(millis);
        }

        if let Some(raw) = lookup(ENV_BLOCK_HEIGHT) {
            let height = raw.trim().parse::<u64>().map_err(|_| ProviderError::InvalidConfig {
                key: ENV_BLOCK_HEIGHT,
                value: raw.clone(),
            })?;
            config.block_height = Some(height);
        }

        Ok(config)
    }

    /// Replaces the endpoint list.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Vec<String>) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Pins every query to `height`.
    #[must_use]
    pub fn with_block_height(mut self, height: Option<u64>) -> Self {
        self.block_height = height;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ProviderConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ProviderConfig::default());
        assert_eq!(config.endpoints.len(), 6);
        assert_eq!(config.timeout, Duration::from_millis(8_000));
        assert_eq!(config.block_height, None);
    }

    #[test]
    fn test_overrides() {
        let config = ProviderConfig::from_lookup(lookup(&[
            (ENV_ENDPOINTS, "http://localhost:1317, https://rest.example.org/ ,"),
            (ENV_TIMEOUT_MS, "2500"),
            (ENV_BLOCK_HEIGHT, "12000000"),
        ]))
        .unwrap();
        assert_eq!(
            config.endpoints,
            vec![
                "http://localhost:1317".to_string(),
                "https://rest.example.org/".to_string()
            ]
        );
        assert_eq!(config.timeout, Duration::from_millis(2_500));
        assert_eq!(config.block_height, Some(12_000_000));
    }

    #[test]
    fn test_invalid_values() {
        for pairs in [
            [(ENV_TIMEOUT_MS, "soon")],
            [(ENV_TIMEOUT_MS, "0")],
            [(ENV_BLOCK_HEIGHT, "-1")],
            [(ENV_ENDPOINTS, " , ")],
        ] {
            assert!(matches!(
                ProviderConfig::from_lookup(lookup(&pairs)),
                Err(ProviderError::InvalidConfig { .. })
            ));
        }
    }
}
