pub mod coingecko;

pub use coingecko::CoinGeckoConnector;

use std::time::Duration;

use common::{MarketSnapshot, PriceSeries};

use crate::error::FetchError;

/// Source of market snapshots and historical series
#[async_trait::async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Up to `limit` assets ordered by market cap, descending
    async fn fetch_markets(&self, limit: usize) -> Result<Vec<MarketSnapshot>, FetchError>;

    /// Price and volume history for one asset over `days`, aborted after `timeout`
    async fn fetch_market_chart(
        &self,
        asset_id: &str,
        days: u32,
        timeout: Duration,
    ) -> Result<PriceSeries, FetchError>;
}
