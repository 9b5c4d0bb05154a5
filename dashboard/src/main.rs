use std::sync::Arc;

use anyhow::Result;
use common::{DataSource, SignalBatch};
use dashboard::{render_overview, render_signals, ChartRegistry, TextChart};
use data_ingestion::{offline_signals, offline_snapshots, CoinGeckoConnector, MarketDataProvider};
use signal_generation::{load_config, ChartService, DashboardConfig, SeededRandom, SignalPipeline};
use tracing::{info, warn, Level};
use tracing_subscriber::fmt;

/// Path to a TOML config file; defaults apply when unset
const CONFIG_ENV: &str = "DASHBOARD_CONFIG";

#[tokio::main]
async fn main() -> Result<()> {
    let config = match std::env::var(CONFIG_ENV) {
        Ok(path) => load_config(&path)?,
        Err(_) => {
            let mut config = DashboardConfig::default();
            config.provider = config.provider.with_env_overrides();
            config
        }
    };

    // Initialize logging
    let level = config.log_level.parse::<Level>().unwrap_or(Level::INFO);
    fmt().with_max_level(level).init();

    info!("Starting crypto signal dashboard");

    // Offline data first so something is on screen before the network answers
    println!("{}", render_overview(&offline_snapshots()));
    println!("{}", render_signals(&SignalBatch::new(DataSource::Offline, offline_signals())));

    let provider: Arc<dyn MarketDataProvider> =
        Arc::new(CoinGeckoConnector::with_config(config.provider.clone()));
    let pipeline = SignalPipeline::new(provider.clone(), config.pipeline.clone());
    let charts = ChartService::new(provider, &config.provider, config.pipeline.clone());

    let (assets, batch) = tokio::join!(pipeline.top_assets(), pipeline.refresh());

    println!("{}", render_overview(&assets));

    if batch.source == DataSource::Offline {
        warn!("Live signals unavailable, keeping offline dataset");
        return Ok(());
    }

    println!("{}", render_signals(&batch));

    let mut rng = SeededRandom::from_optional_seed(config.pipeline.seed);
    let chart_data = charts.charts_for(&batch.signals, &mut rng).await;

    let mut registry = ChartRegistry::new();
    for (signal, data) in batch.signals.iter().zip(&chart_data) {
        let symbol = signal.pair.split('/').next().unwrap_or(&signal.pair);
        let widget = TextChart::new(symbol, data);
        println!("{}\n", widget.render());
        registry.replace(symbol, widget);
    }

    info!(
        "Cycle {} done: {} signals, {} charts",
        batch.cycle_id,
        batch.len(),
        registry.len()
    );

    registry.dispose_all();
    Ok(())
}
