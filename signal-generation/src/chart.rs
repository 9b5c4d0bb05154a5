// Chart Data
// Per-asset price history with indicator overlays, simulated when the provider fails

use std::sync::Arc;
use std::time::Duration;

use common::{ChartAnnotation, ChartData, ChartSource, PriceSeries, Signal};
use data_ingestion::{FetchError, MarketDataProvider, ProviderConfig};
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::random::{simulate_prices, RandomSource};
use crate::stats;

const SMA_PERIOD: usize = 20;
const EMA_PERIOD: usize = 50;
const RSI_PERIOD: usize = 14;

/// Simulated volume per unit of price, `[100_000, 600_000)`
const SIM_VOLUME_BASE: f64 = 100_000.0;
const SIM_VOLUME_SPAN: f64 = 500_000.0;

/// Builds chart data for signals
pub struct ChartService {
    provider: Arc<dyn MarketDataProvider>,
    chart_timeout: Duration,
    history_timeout: Duration,
    config: PipelineConfig,
}

impl ChartService {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        provider_config: &ProviderConfig,
        config: PipelineConfig,
    ) -> Self {
        Self {
            provider,
            chart_timeout: provider_config.batch_timeout(),
            history_timeout: provider_config.history_timeout(),
            config,
        }
    }

    /// Simple price history over `history_days`; `None` on any failure
    pub async fn historical_prices(&self, asset_id: &str) -> Option<PriceSeries> {
        let days = self.config.history_days;
        match self
            .provider
            .fetch_market_chart(asset_id, days, self.history_timeout)
            .await
        {
            Ok(series) => Some(series),
            Err(e) => {
                warn!("Historical prices for {} unavailable: {}", asset_id, e);
                None
            }
        }
    }

    /// Full chart over `days`, falling back to a simulated series
    pub async fn chart_data(
        &self,
        asset_id: &str,
        days: u32,
        is_premium: bool,
        rng: &mut dyn RandomSource,
    ) -> ChartData {
        let result = self
            .provider
            .fetch_market_chart(asset_id, days, self.chart_timeout)
            .await;
        resolve_chart(asset_id, result, days, is_premium, rng)
    }

    /// Charts for the first `max_chart_fetches` signals.
    ///
    /// All fetches run concurrently and fail independently; simulated
    /// fallbacks are drawn from `rng` afterwards in signal order.
    pub async fn charts_for(&self, signals: &[Signal], rng: &mut dyn RandomSource) -> Vec<ChartData> {
        let days = self.config.chart_days;
        let selected = &signals[..signals.len().min(self.config.max_chart_fetches)];

        let fetches = selected.iter().map(|signal| {
            self.provider
                .fetch_market_chart(&signal.id, days, self.chart_timeout)
        });
        let results = join_all(fetches).await;

        let charts: Vec<ChartData> = selected
            .iter()
            .zip(results)
            .map(|(signal, result)| resolve_chart(&signal.id, result, days, signal.is_premium, rng))
            .collect();

        let simulated = charts
            .iter()
            .filter(|c| c.source == ChartSource::Simulated)
            .count();
        info!("Built {} charts ({} simulated)", charts.len(), simulated);

        charts
    }
}

fn resolve_chart(
    asset_id: &str,
    result: Result<PriceSeries, FetchError>,
    days: u32,
    is_premium: bool,
    rng: &mut dyn RandomSource,
) -> ChartData {
    match result {
        Ok(series) if !series.is_empty() => build_chart(asset_id, ChartSource::Live, series, is_premium),
        Ok(_) => {
            debug!("Empty chart series for {}, simulating", asset_id);
            let series = simulate_chart_series(rng, days as usize);
            build_chart(asset_id, ChartSource::Simulated, series, is_premium)
        }
        Err(e) => {
            warn!("Chart data for {} unavailable, simulating: {}", asset_id, e);
            let series = simulate_chart_series(rng, days as usize);
            build_chart(asset_id, ChartSource::Simulated, series, is_premium)
        }
    }
}

/// Attach SMA20, EMA50, RSI and, for premium charts, the support/resistance zones
pub fn build_chart(asset_id: &str, source: ChartSource, series: PriceSeries, is_premium: bool) -> ChartData {
    let sma20 = stats::sma_padded(&series.prices, SMA_PERIOD);
    let ema50 = stats::ema(&series.prices, EMA_PERIOD);
    let rsi = stats::rsi(&series.prices, RSI_PERIOD);
    let annotations = if is_premium {
        premium_annotations(&series.prices)
    } else {
        Vec::new()
    };

    ChartData {
        asset_id: asset_id.to_string(),
        source,
        series,
        sma20,
        ema50,
        rsi,
        annotations,
    }
}

/// Support zone `[min, mean * 0.95]` and resistance zone `[mean * 1.05, max]`
pub fn premium_annotations(prices: &[f64]) -> Vec<ChartAnnotation> {
    if prices.is_empty() {
        return Vec::new();
    }

    let mean = prices.iter().sum::<f64>() / prices.len() as f64;
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    vec![
        ChartAnnotation {
            label: "Support Zone".to_string(),
            y_min: min,
            y_max: mean * 0.95,
        },
        ChartAnnotation {
            label: "Resistance Zone".to_string(),
            y_min: mean * 1.05,
            y_max: max,
        },
    ]
}

/// Random-walk prices with volumes proportional to price
pub fn simulate_chart_series(rng: &mut dyn RandomSource, len: usize) -> PriceSeries {
    let prices = simulate_prices(rng, len);
    let volumes = prices
        .iter()
        .map(|price| price * (rng.next_f64() * SIM_VOLUME_SPAN + SIM_VOLUME_BASE))
        .collect();
    PriceSeries::new(prices, volumes)
}
