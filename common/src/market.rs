use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Quote currency every pair is displayed against
pub const QUOTE_ASSET: &str = "USDT";

/// Market snapshot for one asset, taken once per fetch cycle.
///
/// The provider may omit the 24h fields for thinly traded assets, so they
/// stay optional here and the accessors below apply the fallbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub volume_24h: f64,
    pub market_cap: f64,
    pub market_cap_rank: Option<u32>,
    pub price_change_pct_24h: Option<f64>,
    #[serde(default)]
    pub ath: Option<f64>,
    #[serde(default)]
    pub atl: Option<f64>,
}

impl MarketSnapshot {
    /// 24h percentage change, zero when the provider has none
    pub fn price_change_24h(&self) -> f64 {
        self.price_change_pct_24h.unwrap_or(0.0)
    }

    /// 24h high, or price + 10% when missing
    pub fn high_or_estimate(&self) -> f64 {
        match self.high_24h {
            Some(high) if high > 0.0 => high,
            _ => self.current_price * 1.1,
        }
    }

    /// 24h low, or price - 10% when missing
    pub fn low_or_estimate(&self) -> f64 {
        match self.low_24h {
            Some(low) if low > 0.0 => low,
            _ => self.current_price * 0.9,
        }
    }

    /// Display pair, e.g. `BTC/USDT`
    pub fn pair(&self) -> String {
        format!("{}/{}", self.symbol.to_uppercase(), QUOTE_ASSET)
    }

    /// Assets ranked at or above the cutoff are premium. Unranked assets never are.
    pub fn is_premium(&self, rank_cutoff: u32) -> bool {
        self.market_cap_rank.map_or(false, |rank| rank <= rank_cutoff)
    }
}

/// Chronological price series with parallel volumes.
///
/// `timestamps` is empty for simulated series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub timestamps: Vec<DateTime<Utc>>,
    pub prices: Vec<f64>,
    pub volumes: Vec<f64>,
}

impl PriceSeries {
    pub fn new(prices: Vec<f64>, volumes: Vec<f64>) -> Self {
        Self {
            timestamps: Vec::new(),
            prices,
            volumes,
        }
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn last_price(&self) -> Option<f64> {
        self.prices.last().copied()
    }

    pub fn min_price(&self) -> Option<f64> {
        self.prices.iter().copied().reduce(f64::min)
    }

    pub fn max_price(&self) -> Option<f64> {
        self.prices.iter().copied().reduce(f64::max)
    }
}
