// Signal Batch Pipeline
// Fetch -> filter by market cap -> aggregate -> synthesize -> filter by confidence -> rank

use std::sync::Arc;

use common::{DataSource, MarketSnapshot, PriceSeries, Signal, SignalBatch};
use data_ingestion::{offline_signals, offline_snapshots, MarketDataProvider};
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::indicators::IndicatorAggregator;
use crate::random::{simulate_series, RandomSource, SeededRandom};
use crate::signals::SignalSynthesizer;

/// One refresh cycle over the market-data provider
pub struct SignalPipeline {
    provider: Arc<dyn MarketDataProvider>,
    aggregator: IndicatorAggregator,
    synthesizer: SignalSynthesizer,
    config: PipelineConfig,
}

impl SignalPipeline {
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: PipelineConfig) -> Self {
        Self {
            provider,
            aggregator: IndicatorAggregator::default(),
            synthesizer: SignalSynthesizer::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Aggregate and synthesize one snapshot against a given series
    pub fn evaluate(
        &self,
        snapshot: &MarketSnapshot,
        series: &PriceSeries,
        rng: &mut dyn RandomSource,
    ) -> Signal {
        let indicators = self.aggregator.aggregate(snapshot, series);
        self.synthesizer.synthesize(snapshot, &indicators, rng)
    }

    /// Filter, evaluate and rank already-fetched snapshots.
    ///
    /// Each surviving snapshot gets its own simulated series. The sort is
    /// stable, so equal confidences keep market-cap order.
    pub fn rank(&self, snapshots: &[MarketSnapshot], rng: &mut dyn RandomSource) -> Vec<Signal> {
        let mut signals: Vec<Signal> = snapshots
            .iter()
            .filter(|s| s.market_cap > self.config.min_market_cap)
            .map(|snapshot| {
                let series = simulate_series(rng, self.config.simulated_series_len);
                self.evaluate(snapshot, &series, rng)
            })
            .filter(|signal| signal.confidence > self.config.min_confidence)
            .collect();

        signals.sort_by(|a, b| b.confidence.cmp(&a.confidence));
        signals.truncate(self.config.max_signals);
        signals
    }

    /// Ranked live signals, seeded from config. Empty on any fetch failure.
    pub async fn generate_signals(&self) -> Vec<Signal> {
        let mut rng = SeededRandom::from_optional_seed(self.config.seed);
        self.generate_signals_with(&mut rng).await
    }

    pub async fn generate_signals_with(&self, rng: &mut dyn RandomSource) -> Vec<Signal> {
        let snapshots = match self.provider.fetch_markets(self.config.fetch_limit).await {
            Ok(snapshots) => snapshots,
            Err(e) => {
                warn!("Signal generation skipped, market fetch failed: {}", e);
                return Vec::new();
            }
        };

        let signals = self.rank(&snapshots, rng);
        info!(
            "Generated {} signals from {} snapshots",
            signals.len(),
            snapshots.len()
        );
        signals
    }

    /// Market overview, falling back to the offline snapshot list
    pub async fn top_assets(&self) -> Vec<MarketSnapshot> {
        match self.provider.fetch_markets(self.config.overview_limit).await {
            Ok(snapshots) => snapshots,
            Err(e) => {
                warn!("Market overview fetch failed, using offline data: {}", e);
                offline_snapshots()
            }
        }
    }

    /// Full refresh cycle. An empty live result is replaced by the offline signals.
    pub async fn refresh(&self) -> SignalBatch {
        let signals = self.generate_signals().await;

        if signals.is_empty() {
            debug!("No live signals, serving offline dataset");
            return SignalBatch::new(DataSource::Offline, offline_signals());
        }

        SignalBatch::new(DataSource::Live, signals)
    }
}
