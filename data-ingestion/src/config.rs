//! Market-data provider configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable that overrides the configured API key
pub const API_KEY_ENV: &str = "COINGECKO_API_KEY";

/// Connection settings for the market-data provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// REST base URL, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Demo API key sent as a query parameter when present
    #[serde(default)]
    pub api_key: Option<String>,

    /// Quote currency for prices
    #[serde(default = "default_vs_currency")]
    pub vs_currency: String,

    /// Abort limit for market lists and full chart data (ms)
    #[serde(default = "default_batch_timeout_ms")]
    pub batch_timeout_ms: u64,

    /// Abort limit for the simple historical series (ms)
    #[serde(default = "default_history_timeout_ms")]
    pub history_timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            vs_currency: default_vs_currency(),
            batch_timeout_ms: default_batch_timeout_ms(),
            history_timeout_ms: default_history_timeout_ms(),
        }
    }
}

impl ProviderConfig {
    pub fn batch_timeout(&self) -> Duration {
        Duration::from_millis(self.batch_timeout_ms)
    }

    pub fn history_timeout(&self) -> Duration {
        Duration::from_millis(self.history_timeout_ms)
    }

    /// Apply `COINGECKO_API_KEY` if it is set and non-empty
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.api_key = Some(key.trim().to_string());
            }
        }
        self
    }
}

fn default_base_url() -> String {
    "https://api.coingecko.com/api/v3".to_string()
}

fn default_vs_currency() -> String {
    "usd".to_string()
}

fn default_batch_timeout_ms() -> u64 {
    5_000
}

fn default_history_timeout_ms() -> u64 {
    4_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeouts() {
        let config = ProviderConfig::default();
        assert_eq!(config.batch_timeout(), Duration::from_secs(5));
        assert_eq!(config.history_timeout(), Duration::from_secs(4));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ProviderConfig = serde_json::from_str(r#"{"api_key": "demo"}"#).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("demo"));
        assert_eq!(config.vs_currency, "usd");
        assert_eq!(config.batch_timeout_ms, 5_000);
    }
}
