// Market Data Ingestion (Layer 1)
// Fetches market snapshots and chart series from the public price API

pub mod config;
pub mod connectors;
pub mod error;
pub mod fallback;

pub use config::ProviderConfig;
pub use connectors::{CoinGeckoConnector, MarketDataProvider};
pub use error::FetchError;
pub use fallback::{offline_signals, offline_snapshots};
