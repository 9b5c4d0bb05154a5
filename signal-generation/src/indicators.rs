// Indicator Aggregator
// Combines the statistics primitives into one indicator bundle per snapshot

use common::{
    IndicatorSet, MacdSignal, MarketPhase, MarketSnapshot, MarketStructure, ObvSignal,
    PriceSeries, StructureStrength, Trend,
};
use tracing::debug;

use crate::stats;

/// MACD line, signal line and histogram at the last point of the series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdReading {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

impl MacdReading {
    pub fn label(&self) -> MacdSignal {
        if self.signal > self.macd {
            MacdSignal::Bearish
        } else {
            MacdSignal::Bullish
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub middle: f64,
    pub upper: f64,
    pub lower: f64,
}

/// Indicator periods
#[derive(Debug, Clone)]
pub struct IndicatorAggregator {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    pub bollinger_width: f64,
}

impl Default for IndicatorAggregator {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_width: 2.0,
        }
    }
}

impl IndicatorAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the full indicator bundle for one snapshot and its series
    pub fn aggregate(&self, snapshot: &MarketSnapshot, series: &PriceSeries) -> IndicatorSet {
        let rsi = stats::rsi(&series.prices, self.rsi_period);
        let macd = self.macd(&series.prices);
        let bands = self.bollinger(&series.prices);
        let obv = on_balance_volume(&series.prices, &series.volumes);

        let structure = market_structure(
            snapshot.high_or_estimate(),
            snapshot.low_or_estimate(),
            snapshot.current_price,
        );

        let set = IndicatorSet {
            rsi,
            macd: macd.label(),
            obv: if obv > 0.0 {
                ObvSignal::Accumulation
            } else {
                ObvSignal::Distribution
            },
            trend: trend(series.last_price(), bands),
            volatility_score: volatility_score(snapshot),
            market_structure: structure,
        };

        debug!(
            "{}: rsi={:.1} macd={:?} obv={:?} vol={} phase={:?}",
            snapshot.symbol, set.rsi, set.macd, set.obv, set.volatility_score, structure.phase
        );

        set
    }

    /// MACD line = EMA(fast) - EMA(slow); signal = EMA(signal) of the MACD line
    pub fn macd(&self, prices: &[f64]) -> MacdReading {
        let fast = stats::ema(prices, self.macd_fast);
        let slow = stats::ema(prices, self.macd_slow);

        let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal_line = stats::ema(&line, self.macd_signal);

        let macd = line.last().copied().unwrap_or(0.0);
        let signal = signal_line.last().copied().unwrap_or(0.0);

        MacdReading {
            macd,
            signal,
            histogram: macd - signal,
        }
    }

    /// Bands over the last `bollinger_period` prices, or the whole series when shorter
    pub fn bollinger(&self, prices: &[f64]) -> Option<BollingerBands> {
        if prices.is_empty() {
            return None;
        }

        let period = self.bollinger_period.min(prices.len()).max(1);
        let middle = stats::sma(prices, period).last().copied()?;
        let width = self.bollinger_width * stats::standard_deviation(prices, period);

        Some(BollingerBands {
            middle,
            upper: middle + width,
            lower: middle - width,
        })
    }
}

/// Cumulative volume, added on up-ticks and subtracted on down-ticks
pub fn on_balance_volume(prices: &[f64], volumes: &[f64]) -> f64 {
    let n = prices.len().min(volumes.len());
    let mut obv = 0.0;

    for i in 1..n {
        if prices[i] > prices[i - 1] {
            obv += volumes[i];
        } else if prices[i] < prices[i - 1] {
            obv -= volumes[i];
        }
    }

    obv
}

/// Last price against the middle band
pub fn trend(last_price: Option<f64>, bands: Option<BollingerBands>) -> Trend {
    match (last_price, bands) {
        (Some(price), Some(bands)) if price > bands.middle => Trend::Bullish,
        (Some(price), Some(bands)) if price < bands.middle => Trend::Bearish,
        _ => Trend::Neutral,
    }
}

/// Blend of |24h change| and the 24h range as a percent of the low, scaled to 0-100
pub fn volatility_score(snapshot: &MarketSnapshot) -> u32 {
    let price_volatility = snapshot.price_change_24h().abs();

    let range_pct = match (snapshot.high_24h, snapshot.low_24h) {
        (Some(high), Some(low)) if high > 0.0 && low > 0.0 => (high - low) / low * 100.0,
        _ => 0.0,
    };

    let score = ((price_volatility * 2.0 + range_pct) / 3.0 * 5.0).floor();
    score.clamp(0.0, 100.0) as u32
}

/// Position of the price inside the 24h range, clamped to `[0, 1]`.
///
/// A flat or inverted range reads as mid-range.
pub fn market_structure(high: f64, low: f64, price: f64) -> MarketStructure {
    let range = high - low;
    let position = if range > 0.0 {
        ((price - low) / range).clamp(0.0, 1.0)
    } else {
        0.5
    };

    let strength = if position > 0.6 {
        StructureStrength::Strong
    } else if position < 0.4 {
        StructureStrength::Weak
    } else {
        StructureStrength::Neutral
    };

    MarketStructure {
        position,
        strength,
        phase: market_phase(position),
    }
}

fn market_phase(position: f64) -> MarketPhase {
    if position > 0.8 {
        MarketPhase::Overbought
    } else if position > 0.6 {
        MarketPhase::Bullish
    } else if position < 0.2 {
        MarketPhase::Oversold
    } else if position < 0.4 {
        MarketPhase::Bearish
    } else {
        MarketPhase::Consolidation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(price: f64, high: f64, low: f64, change: f64) -> MarketSnapshot {
        MarketSnapshot {
            id: "test".to_string(),
            symbol: "TST".to_string(),
            name: "Test".to_string(),
            current_price: price,
            high_24h: Some(high),
            low_24h: Some(low),
            volume_24h: 1_000_000.0,
            market_cap: 10_000_000.0,
            market_cap_rank: Some(50),
            price_change_pct_24h: Some(change),
            ath: None,
            atl: None,
        }
    }

    #[test]
    fn test_volatility_score_blend() {
        // |-6| * 2 = 12, range 10/45*100 = 22.2..., (34.2 / 3) * 5 = 57.03
        assert_eq!(volatility_score(&snapshot(50.0, 55.0, 45.0, -6.0)), 57);
    }

    #[test]
    fn test_volatility_score_is_capped() {
        assert_eq!(volatility_score(&snapshot(10.0, 30.0, 5.0, 80.0)), 100);
    }

    #[test]
    fn test_volatility_score_without_range() {
        let mut snap = snapshot(10.0, 0.0, 0.0, 3.0);
        snap.high_24h = None;
        assert_eq!(volatility_score(&snap), 10);
    }

    #[test]
    fn test_market_structure_thresholds() {
        let s = market_structure(100.0, 0.0, 90.0);
        assert_eq!(s.strength, StructureStrength::Strong);
        assert_eq!(s.phase, MarketPhase::Overbought);

        let s = market_structure(100.0, 0.0, 70.0);
        assert_eq!(s.phase, MarketPhase::Bullish);

        let s = market_structure(100.0, 0.0, 50.0);
        assert_eq!(s.strength, StructureStrength::Neutral);
        assert_eq!(s.phase, MarketPhase::Consolidation);

        let s = market_structure(100.0, 0.0, 30.0);
        assert_eq!(s.strength, StructureStrength::Weak);
        assert_eq!(s.phase, MarketPhase::Bearish);

        let s = market_structure(100.0, 0.0, 10.0);
        assert_eq!(s.phase, MarketPhase::Oversold);
    }

    #[test]
    fn test_market_structure_flat_range() {
        let s = market_structure(10.0, 10.0, 10.0);
        assert_eq!(s.position, 0.5);
        assert_eq!(s.phase, MarketPhase::Consolidation);
    }

    #[test]
    fn test_obv_accumulates_by_direction() {
        let prices = [10.0, 11.0, 11.0, 9.0, 12.0];
        let volumes = [100.0, 200.0, 300.0, 50.0, 25.0];
        // +200, hold, -50, +25
        assert_eq!(on_balance_volume(&prices, &volumes), 175.0);
        assert_eq!(on_balance_volume(&prices, &[]), 0.0);
    }

    #[test]
    fn test_macd_rising_series_is_bullish() {
        let prices: Vec<f64> = (0..40).map(|i| 100.0 + i as f64 * 2.0).collect();
        let reading = IndicatorAggregator::default().macd(&prices);
        assert!(reading.macd > 0.0);
        assert_eq!(reading.label(), MacdSignal::Bullish);
    }

    #[test]
    fn test_macd_falling_series_is_bearish() {
        let prices: Vec<f64> = (0..40).map(|i| 200.0 - i as f64 * 2.0).collect();
        let reading = IndicatorAggregator::default().macd(&prices);
        assert!(reading.macd < 0.0);
        assert_eq!(reading.label(), MacdSignal::Bearish);
    }

    #[test]
    fn test_bollinger_bands() {
        let prices = vec![10.0; 25];
        let bands = IndicatorAggregator::default().bollinger(&prices).unwrap();
        assert_eq!(bands.middle, 10.0);
        assert_eq!(bands.upper, 10.0);
        assert_eq!(bands.lower, 10.0);
        assert!(IndicatorAggregator::default().bollinger(&[]).is_none());
    }

    #[test]
    fn test_aggregate_falling_series() {
        let prices: Vec<f64> = (0..30).map(|i| 100.0 - i as f64).collect();
        let volumes = vec![1_000.0; 30];
        let series = PriceSeries::new(prices, volumes);

        let set = IndicatorAggregator::default().aggregate(&snapshot(50.0, 55.0, 45.0, -6.0), &series);
        assert!(set.rsi < 30.0);
        assert_eq!(set.obv, ObvSignal::Distribution);
        assert_eq!(set.trend, Trend::Bearish);
        assert_eq!(set.volatility_score, 57);
        assert_eq!(set.market_structure.phase, MarketPhase::Consolidation);
    }
}
