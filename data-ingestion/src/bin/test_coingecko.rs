use data_ingestion::{CoinGeckoConnector, MarketDataProvider, ProviderConfig};
use tracing::{error, info};
use tracing_subscriber::fmt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("Starting CoinGecko connectivity test...");

    // Note: This test hits the real public API and is subject to its rate limits
    // Run with: cargo run --bin test_coingecko
    let config = ProviderConfig::default().with_env_overrides();
    info!("Using {} (api key: {})", config.base_url, config.api_key.is_some());

    let connector = CoinGeckoConnector::with_config(config);

    match connector.fetch_markets(10).await {
        Ok(snapshots) => {
            for snapshot in &snapshots {
                info!(
                    "#{:<4} {:<6} ${:<14} 24h {:>7.2}%  cap {:.0}",
                    snapshot.market_cap_rank.unwrap_or(0),
                    snapshot.symbol,
                    snapshot.current_price,
                    snapshot.price_change_24h(),
                    snapshot.market_cap
                );
            }
        }
        Err(e) => error!("Market list failed: {}", e),
    }

    let timeout = connector.config().history_timeout();
    match connector.fetch_market_chart("bitcoin", 7, timeout).await {
        Ok(series) => info!(
            "bitcoin: {} price points, {} volume points, last {:?}",
            series.prices.len(),
            series.volumes.len(),
            series.last_price()
        ),
        Err(e) => error!("Market chart failed: {}", e),
    }

    info!("Test complete.");
    Ok(())
}
