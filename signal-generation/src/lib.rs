// Signal Generation Framework (Layer 2)
// Turns market snapshots into ranked BUY/SELL/NEUTRAL signals and chart overlays

pub mod chart;
pub mod config;
pub mod indicators;
pub mod levels;
pub mod pipeline;
pub mod random;
pub mod signals;
pub mod stats;

pub use chart::{build_chart, premium_annotations, simulate_chart_series, ChartService};
pub use config::{
    create_config_template, load_config, save_config, DashboardConfig, PipelineConfig,
};
pub use indicators::{BollingerBands, IndicatorAggregator, MacdReading};
pub use levels::{support_resistance, SupportResistance};
pub use pipeline::SignalPipeline;
pub use random::{simulate_series, RandomSource, SeededRandom};
pub use signals::{ai_prediction, risk_reward, SignalSynthesizer, TRADING_PATTERNS};
