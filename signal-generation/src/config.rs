//! Signal generation and dashboard configuration
//!
//! Every tuning knob of the pipeline lives here as a named default.

use data_ingestion::ProviderConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FETCH_LIMIT: usize = 500;
pub const DEFAULT_OVERVIEW_LIMIT: usize = 50;
pub const DEFAULT_MIN_MARKET_CAP: f64 = 1_000_000.0;
pub const DEFAULT_MIN_CONFIDENCE: u8 = 65;
pub const DEFAULT_MAX_SIGNALS: usize = 25;
pub const DEFAULT_PREMIUM_RANK_CUTOFF: u32 = 100;
pub const DEFAULT_BASE_CONFIDENCE: u8 = 65;
pub const DEFAULT_CONFIDENCE_BOOST: u8 = 10;
pub const DEFAULT_BOOSTED_CONFIDENCE_CAP: u8 = 85;
pub const DEFAULT_RSI_OVERSOLD: f64 = 30.0;
pub const DEFAULT_RSI_OVERBOUGHT: f64 = 70.0;
pub const DEFAULT_PRICE_CHANGE_TRIGGER_PCT: f64 = 5.0;
pub const DEFAULT_SIMULATED_SERIES_LEN: usize = 30;
pub const DEFAULT_MAX_CHART_FETCHES: usize = 10;
pub const DEFAULT_CHART_DAYS: u32 = 90;
pub const DEFAULT_HISTORY_DAYS: u32 = 30;

/// Batch pipeline and signal rule settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Assets requested per cycle, ordered by market cap
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,

    /// Assets shown in the market overview
    #[serde(default = "default_overview_limit")]
    pub overview_limit: usize,

    /// Snapshots at or below this market cap are skipped (USD)
    #[serde(default = "default_min_market_cap")]
    pub min_market_cap: f64,

    /// Signals at or below this confidence are dropped
    #[serde(default = "default_min_confidence")]
    pub min_confidence: u8,

    /// Maximum signals kept per cycle
    #[serde(default = "default_max_signals")]
    pub max_signals: usize,

    /// Market-cap rank at or above which a signal is premium
    #[serde(default = "default_premium_rank_cutoff")]
    pub premium_rank_cutoff: u32,

    #[serde(default = "default_base_confidence")]
    pub base_confidence: u8,

    /// Added to the base confidence when a BUY/SELL rule fires
    #[serde(default = "default_confidence_boost")]
    pub confidence_boost: u8,

    /// Ceiling for boosted confidence
    #[serde(default = "default_boosted_confidence_cap")]
    pub boosted_confidence_cap: u8,

    #[serde(default = "default_rsi_oversold")]
    pub rsi_oversold: f64,

    #[serde(default = "default_rsi_overbought")]
    pub rsi_overbought: f64,

    /// Absolute 24h change (%) required alongside the RSI condition
    #[serde(default = "default_price_change_trigger_pct")]
    pub price_change_trigger_pct: f64,

    /// Points in the simulated series used for indicator computation
    #[serde(default = "default_simulated_series_len")]
    pub simulated_series_len: usize,

    /// Signals that get chart data fetched concurrently
    #[serde(default = "default_max_chart_fetches")]
    pub max_chart_fetches: usize,

    /// Day range for full chart data
    #[serde(default = "default_chart_days")]
    pub chart_days: u32,

    /// Day range for the simple historical series
    #[serde(default = "default_history_days")]
    pub history_days: u32,

    /// Seed for the random source; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fetch_limit: DEFAULT_FETCH_LIMIT,
            overview_limit: DEFAULT_OVERVIEW_LIMIT,
            min_market_cap: DEFAULT_MIN_MARKET_CAP,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            max_signals: DEFAULT_MAX_SIGNALS,
            premium_rank_cutoff: DEFAULT_PREMIUM_RANK_CUTOFF,
            base_confidence: DEFAULT_BASE_CONFIDENCE,
            confidence_boost: DEFAULT_CONFIDENCE_BOOST,
            boosted_confidence_cap: DEFAULT_BOOSTED_CONFIDENCE_CAP,
            rsi_oversold: DEFAULT_RSI_OVERSOLD,
            rsi_overbought: DEFAULT_RSI_OVERBOUGHT,
            price_change_trigger_pct: DEFAULT_PRICE_CHANGE_TRIGGER_PCT,
            simulated_series_len: DEFAULT_SIMULATED_SERIES_LEN,
            max_chart_fetches: DEFAULT_MAX_CHART_FETCHES,
            chart_days: DEFAULT_CHART_DAYS,
            history_days: DEFAULT_HISTORY_DAYS,
            seed: None,
        }
    }
}

fn default_fetch_limit() -> usize {
    DEFAULT_FETCH_LIMIT
}

fn default_overview_limit() -> usize {
    DEFAULT_OVERVIEW_LIMIT
}

fn default_min_market_cap() -> f64 {
    DEFAULT_MIN_MARKET_CAP
}

fn default_min_confidence() -> u8 {
    DEFAULT_MIN_CONFIDENCE
}

fn default_max_signals() -> usize {
    DEFAULT_MAX_SIGNALS
}

fn default_premium_rank_cutoff() -> u32 {
    DEFAULT_PREMIUM_RANK_CUTOFF
}

fn default_base_confidence() -> u8 {
    DEFAULT_BASE_CONFIDENCE
}

fn default_confidence_boost() -> u8 {
    DEFAULT_CONFIDENCE_BOOST
}

fn default_boosted_confidence_cap() -> u8 {
    DEFAULT_BOOSTED_CONFIDENCE_CAP
}

fn default_rsi_oversold() -> f64 {
    DEFAULT_RSI_OVERSOLD
}

fn default_rsi_overbought() -> f64 {
    DEFAULT_RSI_OVERBOUGHT
}

fn default_price_change_trigger_pct() -> f64 {
    DEFAULT_PRICE_CHANGE_TRIGGER_PCT
}

fn default_simulated_series_len() -> usize {
    DEFAULT_SIMULATED_SERIES_LEN
}

fn default_max_chart_fetches() -> usize {
    DEFAULT_MAX_CHART_FETCHES
}

fn default_chart_days() -> u32 {
    DEFAULT_CHART_DAYS
}

fn default_history_days() -> u32 {
    DEFAULT_HISTORY_DAYS
}

/// Top-level configuration for the dashboard binary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// One of trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load configuration from TOML file, then apply environment overrides
pub fn load_config(path: &str) -> anyhow::Result<DashboardConfig> {
    let content = std::fs::read_to_string(path)?;
    let mut config: DashboardConfig = toml::from_str(&content)?;
    config.provider = config.provider.with_env_overrides();
    Ok(config)
}

/// Save configuration to TOML file
pub fn save_config(config: &DashboardConfig, path: &str) -> anyhow::Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Create a default configuration file template
pub fn create_config_template(path: &str) -> anyhow::Result<()> {
    let template = "# Crypto Signal Dashboard Configuration

# trace, debug, info, warn, error
log_level = \"info\"

[provider]
base_url = \"https://api.coingecko.com/api/v3\"
# Demo API key; COINGECKO_API_KEY overrides it
# api_key = \"CG-...\"
vs_currency = \"usd\"

# Abort market lists and full chart data after (ms)
batch_timeout_ms = 5000

# Abort the simple historical series after (ms)
history_timeout_ms = 4000

[pipeline]
# Assets requested per cycle (ordered by market cap)
fetch_limit = 500
overview_limit = 50

# Skip snapshots at or below this market cap (USD)
min_market_cap = 1000000.0

# Drop signals at or below this confidence, keep the best N
min_confidence = 65
max_signals = 25

# Market-cap rank at or above which a signal is premium
premium_rank_cutoff = 100

# Confidence = base + volatility / 3, boosted when a BUY/SELL rule fires
base_confidence = 65
confidence_boost = 10
boosted_confidence_cap = 85

# BUY: RSI below oversold and 24h change below -trigger
# SELL: RSI above overbought and 24h change above +trigger
rsi_oversold = 30.0
rsi_overbought = 70.0
price_change_trigger_pct = 5.0

simulated_series_len = 30
max_chart_fetches = 10
chart_days = 90
history_days = 30

# Fixed seed for reproducible cycles
# seed = 42
";

    std::fs::write(path, template)?;
    Ok(())
}
