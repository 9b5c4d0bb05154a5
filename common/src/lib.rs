// Shared domain records for the crypto signal dashboard
// Every layer (ingestion, signal generation, presentation) speaks these types

pub mod chart;
pub mod format;
pub mod market;
pub mod signal;

pub use chart::{ChartAnnotation, ChartData, ChartSource};
pub use format::{format_compact, price_precision, to_fixed};
pub use market::{MarketSnapshot, PriceSeries};
pub use signal::{
    DataSource, IndicatorSet, KeyLevels, MacdSignal, MarketPhase, MarketStructure, ObvSignal,
    Signal, SignalBatch, SignalIndicators, SignalType, StructureStrength, Trend, VolumeProfile,
};

pub use chrono::{DateTime, Utc};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
