use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Signal classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalType {
    Buy,
    Sell,
    Neutral,
}

/// MACD crossover reading. `Neutral` only appears in curated offline data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MacdSignal {
    Bullish,
    Bearish,
    Neutral,
}

/// On-balance volume reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObvSignal {
    Accumulation,
    Distribution,
}

/// Price position relative to the Bollinger middle band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StructureStrength {
    Strong,
    Weak,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketPhase {
    Overbought,
    Bullish,
    Oversold,
    Bearish,
    Consolidation,
}

/// Where the price sits inside its 24h range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStructure {
    /// (price - low) / (high - low)
    pub position: f64,
    pub strength: StructureStrength,
    pub phase: MarketPhase,
}

/// Full indicator bundle for one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSet {
    /// 0-100
    pub rsi: f64,
    pub macd: MacdSignal,
    pub obv: ObvSignal,
    pub trend: Trend,
    /// 0-100
    pub volatility_score: u32,
    pub market_structure: MarketStructure,
}

/// Indicator subset carried on a signal card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalIndicators {
    pub rsi: u32,
    pub macd: MacdSignal,
    pub trend: Trend,
}

impl From<&IndicatorSet> for SignalIndicators {
    fn from(set: &IndicatorSet) -> Self {
        Self {
            rsi: set.rsi.floor().clamp(0.0, 100.0) as u32,
            macd: set.macd,
            trend: set.trend,
        }
    }
}

/// Trade and structure levels, already rounded to display precision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyLevels {
    pub entry_price: Decimal,
    pub target_price: Decimal,
    pub stop_loss: Decimal,
    pub support: Decimal,
    pub resistance: Decimal,
    /// 0-100
    pub support_strength: u8,
    /// 0-100
    pub resistance_strength: u8,
}

/// Volume profile annotation. Currently always empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeProfile {}

/// A trading signal, built fresh each fetch cycle and never mutated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    /// Provider asset id, e.g. `bitcoin`
    pub id: String,
    pub pair: String,
    pub name: String,
    pub signal_type: SignalType,
    pub pattern: String,
    /// 0-100
    pub confidence: u8,
    #[serde(flatten)]
    pub levels: KeyLevels,
    pub potential_gain: Decimal,
    /// `1:x.xx`
    pub risk_reward: String,
    pub price_change_24h: Decimal,
    pub volume_24h: f64,
    pub market_cap: f64,
    pub indicators: SignalIndicators,
    pub ai_prediction: String,
    #[serde(default)]
    pub volume_profile: VolumeProfile,
    pub is_premium: bool,
}

/// Origin of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Offline,
}

/// Ranked signal list for one refresh cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalBatch {
    pub cycle_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub source: DataSource,
    pub signals: Vec<Signal>,
}

impl SignalBatch {
    pub fn new(source: DataSource, signals: Vec<Signal>) -> Self {
        Self {
            cycle_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            source,
            signals,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }
}
