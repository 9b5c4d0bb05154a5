// Signal Synthesizer
// Turns one snapshot and its indicator bundle into a BUY, SELL or NEUTRAL signal

use common::{
    price_precision, to_fixed, IndicatorSet, KeyLevels, MarketSnapshot, Signal,
    SignalIndicators, SignalType, VolumeProfile,
};
use rust_decimal::prelude::*;
use tracing::debug;

use crate::config::PipelineConfig;
use crate::levels::support_resistance;
use crate::random::RandomSource;

/// Cosmetic pattern names. Picked at random, not derived from the indicators.
pub const TRADING_PATTERNS: [&str; 6] = [
    "Bullish Breakout",
    "Strong Buy Signal",
    "Support Bounce",
    "Trend Continuation",
    "Volume Breakout",
    "Momentum Entry",
];

const BUY_STOP: f64 = 0.95;
const BUY_TARGET: f64 = 1.15;
const SELL_STOP: f64 = 1.05;
const SELL_TARGET: f64 = 0.85;

/// Decimal places for trade levels and for support/resistance above $1
const TRADE_DP: u32 = 4;
const STRUCTURE_DP: u32 = 2;

/// Rule thresholds and confidence settings
#[derive(Debug, Clone)]
pub struct SignalSynthesizer {
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub price_change_trigger_pct: f64,
    pub base_confidence: u8,
    pub confidence_boost: u8,
    pub boosted_confidence_cap: u8,
    pub premium_rank_cutoff: u32,
}

impl Default for SignalSynthesizer {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

impl SignalSynthesizer {
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            rsi_oversold: config.rsi_oversold,
            rsi_overbought: config.rsi_overbought,
            price_change_trigger_pct: config.price_change_trigger_pct,
            base_confidence: config.base_confidence,
            confidence_boost: config.confidence_boost,
            boosted_confidence_cap: config.boosted_confidence_cap,
            premium_rank_cutoff: config.premium_rank_cutoff,
        }
    }

    /// `floor(base + volatility / 3)`, clamped to 100
    pub fn base_confidence(&self, volatility_score: u32) -> u8 {
        let confidence = (self.base_confidence as f64 + volatility_score as f64 / 3.0).floor();
        confidence.clamp(0.0, 100.0) as u8
    }

    /// First matching rule wins: oversold dip, then overbought rally, else neutral
    pub fn classify(&self, rsi: f64, price_change_24h: f64) -> SignalType {
        if rsi < self.rsi_oversold && price_change_24h < -self.price_change_trigger_pct {
            SignalType::Buy
        } else if rsi > self.rsi_overbought && price_change_24h > self.price_change_trigger_pct {
            SignalType::Sell
        } else {
            SignalType::Neutral
        }
    }

    /// Build the signal for one snapshot.
    ///
    /// Draws from `rng` in a fixed order: support jitter, resistance jitter,
    /// then the pattern label.
    pub fn synthesize(
        &self,
        snapshot: &MarketSnapshot,
        indicators: &IndicatorSet,
        rng: &mut dyn RandomSource,
    ) -> Signal {
        let price = snapshot.current_price;
        let change = snapshot.price_change_24h();

        let sr = support_resistance(snapshot, indicators.volatility_score, rng);
        let pattern = TRADING_PATTERNS[rng.pick_index(TRADING_PATTERNS.len())];

        let signal_type = self.classify(indicators.rsi, change);
        let base = self.base_confidence(indicators.volatility_score);

        let (target, stop, confidence, potential_gain) = match signal_type {
            SignalType::Buy => (price * BUY_TARGET, price * BUY_STOP, self.boost(base), Decimal::new(1500, 2)),
            SignalType::Sell => (price * SELL_TARGET, price * SELL_STOP, self.boost(base), Decimal::new(1500, 2)),
            SignalType::Neutral => (price, price, base, Decimal::new(0, 2)),
        };

        let trade_dp = price_precision(price, TRADE_DP);
        let structure_dp = price_precision(price, STRUCTURE_DP);

        let levels = KeyLevels {
            entry_price: to_fixed(price, trade_dp),
            target_price: to_fixed(target, trade_dp),
            stop_loss: to_fixed(stop, trade_dp),
            support: to_fixed(sr.support, structure_dp),
            resistance: to_fixed(sr.resistance, structure_dp),
            support_strength: sr.support_strength,
            resistance_strength: sr.resistance_strength,
        };

        let risk_reward = risk_reward(levels.entry_price, levels.target_price, levels.stop_loss);

        debug!(
            "{}: {:?} confidence={} rr={} rsi={:.1} change={:.2}",
            snapshot.symbol, signal_type, confidence, risk_reward, indicators.rsi, change
        );

        Signal {
            id: snapshot.id.clone(),
            pair: snapshot.pair(),
            name: snapshot.name.clone(),
            signal_type,
            pattern: pattern.to_string(),
            confidence,
            levels,
            potential_gain,
            risk_reward,
            price_change_24h: to_fixed(change, 2),
            volume_24h: snapshot.volume_24h,
            market_cap: snapshot.market_cap,
            indicators: SignalIndicators::from(indicators),
            ai_prediction: ai_prediction(signal_type, confidence),
            volume_profile: VolumeProfile::default(),
            is_premium: snapshot.is_premium(self.premium_rank_cutoff),
        }
    }

    fn boost(&self, base: u8) -> u8 {
        base.saturating_add(self.confidence_boost)
            .min(self.boosted_confidence_cap)
            .min(100)
    }
}

/// `1:x.xx` reward per unit of risk, or `1:1` when entry equals the stop
pub fn risk_reward(entry: Decimal, target: Decimal, stop: Decimal) -> String {
    let loss = (entry - stop).abs();
    if loss.is_zero() {
        return "1:1".to_string();
    }

    let mut ratio = ((target - entry).abs() / loss)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    ratio.rescale(2);
    format!("1:{}", ratio)
}

pub fn ai_prediction(signal_type: SignalType, confidence: u8) -> String {
    match signal_type {
        SignalType::Buy => format!(
            "Strong buy opportunity detected with {}% confidence level. Technical analysis indicates favorable entry point with high probability of upward movement.",
            confidence
        ),
        SignalType::Sell => format!(
            "Sell signal identified with {}% confidence. Technical indicators suggest potential downward movement.",
            confidence
        ),
        SignalType::Neutral => {
            "Neutral market conditions. Monitor for better entry opportunities.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::IndicatorAggregator;
    use crate::random::SeededRandom;
    use common::{MacdSignal, MarketPhase, MarketStructure, ObvSignal, PriceSeries, StructureStrength, Trend};

    struct ConstantRandom(f64);

    impl RandomSource for ConstantRandom {
        fn next_f64(&mut self) -> f64 {
            self.0
        }
    }

    fn snapshot(price: f64, change: f64) -> MarketSnapshot {
        MarketSnapshot {
            id: "test-coin".to_string(),
            symbol: "TST".to_string(),
            name: "Test Coin".to_string(),
            current_price: price,
            high_24h: Some(price * 1.1),
            low_24h: Some(price * 0.9),
            volume_24h: 5_000_000.0,
            market_cap: 50_000_000.0,
            market_cap_rank: Some(42),
            price_change_pct_24h: Some(change),
            ath: None,
            atl: None,
        }
    }

    fn indicators(rsi: f64, volatility_score: u32) -> IndicatorSet {
        IndicatorSet {
            rsi,
            macd: MacdSignal::Bullish,
            obv: ObvSignal::Accumulation,
            trend: Trend::Neutral,
            volatility_score,
            market_structure: MarketStructure {
                position: 0.5,
                strength: StructureStrength::Neutral,
                phase: MarketPhase::Consolidation,
            },
        }
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    #[test]
    fn test_risk_reward_zero_loss_falls_back() {
        assert_eq!(risk_reward(dec("100"), dec("110"), dec("100")), "1:1");
        assert_eq!(risk_reward(dec("100"), dec("115"), dec("95")), "1:3.00");
        assert_eq!(risk_reward(dec("100"), dec("85"), dec("105")), "1:3.00");
    }

    #[test]
    fn test_base_confidence_range() {
        let synth = SignalSynthesizer::default();
        assert_eq!(synth.base_confidence(0), 65);
        assert_eq!(synth.base_confidence(57), 84);
        assert_eq!(synth.base_confidence(100), 98);
        for vol in 0..=100 {
            let base = synth.base_confidence(vol);
            assert!((65..=98).contains(&base));
            assert!(synth.boost(base) <= 85);
        }
    }

    #[test]
    fn test_classify_priority() {
        let synth = SignalSynthesizer::default();
        assert_eq!(synth.classify(25.0, -6.0), SignalType::Buy);
        assert_eq!(synth.classify(75.0, 6.0), SignalType::Sell);
        // Both conditions must hold
        assert_eq!(synth.classify(25.0, -4.0), SignalType::Neutral);
        assert_eq!(synth.classify(75.0, -6.0), SignalType::Neutral);
        assert_eq!(synth.classify(30.0, -10.0), SignalType::Neutral);
    }

    #[test]
    fn test_sell_levels() {
        let signal = SignalSynthesizer::default().synthesize(
            &snapshot(200.0, 8.0),
            &indicators(80.0, 30),
            &mut ConstantRandom(0.0),
        );

        assert_eq!(signal.signal_type, SignalType::Sell);
        assert_eq!(signal.levels.target_price.to_string(), "170.0000");
        assert_eq!(signal.levels.stop_loss.to_string(), "210.0000");
        assert_eq!(signal.risk_reward, "1:3.00");
        assert_eq!(signal.confidence, 85);
        assert_eq!(signal.potential_gain.to_string(), "15.00");
        assert!(signal.ai_prediction.starts_with("Sell signal identified with 85%"));
    }

    #[test]
    fn test_neutral_levels_are_flat() {
        let signal = SignalSynthesizer::default().synthesize(
            &snapshot(0.5, 1.0),
            &indicators(50.0, 12),
            &mut ConstantRandom(0.0),
        );

        assert_eq!(signal.signal_type, SignalType::Neutral);
        assert_eq!(signal.levels.entry_price.to_string(), "0.500000");
        assert_eq!(signal.levels.target_price, signal.levels.entry_price);
        assert_eq!(signal.levels.stop_loss, signal.levels.entry_price);
        assert_eq!(signal.risk_reward, "1:1");
        assert_eq!(signal.confidence, 69);
        assert_eq!(signal.potential_gain.to_string(), "0.00");
        assert_eq!(
            signal.ai_prediction,
            "Neutral market conditions. Monitor for better entry opportunities."
        );
    }

    #[test]
    fn test_record_fields() {
        let signal = SignalSynthesizer::default().synthesize(
            &snapshot(100.0, -3.456),
            &indicators(41.9, 20),
            &mut ConstantRandom(0.0),
        );

        assert_eq!(signal.id, "test-coin");
        assert_eq!(signal.pair, "TST/USDT");
        assert_eq!(signal.pattern, "Bullish Breakout");
        assert_eq!(signal.price_change_24h.to_string(), "-3.46");
        assert_eq!(signal.indicators.rsi, 41);
        assert!(signal.is_premium);
        assert_eq!(signal.levels.support.scale(), 2);
    }

    #[test]
    fn test_end_to_end_buy() {
        let snap = MarketSnapshot {
            id: "dip".to_string(),
            symbol: "DIP".to_string(),
            name: "Dip".to_string(),
            current_price: 50.0,
            high_24h: Some(55.0),
            low_24h: Some(45.0),
            volume_24h: 2_000_000.0,
            market_cap: 20_000_000.0,
            market_cap_rank: Some(150),
            price_change_pct_24h: Some(-6.0),
            ath: None,
            atl: None,
        };
        let prices: Vec<f64> = (0..30).map(|i| 100.0 - i as f64).collect();
        let series = PriceSeries::new(prices, vec![1_000.0; 30]);

        let set = IndicatorAggregator::default().aggregate(&snap, &series);
        let signal = SignalSynthesizer::default().synthesize(&snap, &set, &mut SeededRandom::with_seed(3));

        assert_eq!(signal.signal_type, SignalType::Buy);
        assert_eq!(signal.levels.entry_price.to_string(), "50.0000");
        assert_eq!(signal.levels.target_price.to_string(), "57.5000");
        assert_eq!(signal.levels.stop_loss.to_string(), "47.5000");
        assert_eq!(signal.risk_reward, "1:3.00");
        assert_eq!(signal.confidence, 85);
        assert!(!signal.is_premium);
        assert!(TRADING_PATTERNS.contains(&signal.pattern.as_str()));
    }

    #[test]
    fn test_same_inputs_same_signal() {
        let snap = snapshot(100.0, -7.0);
        let set = indicators(20.0, 40);
        let synth = SignalSynthesizer::default();

        let a = synth.synthesize(&snap, &set, &mut SeededRandom::with_seed(11));
        let b = synth.synthesize(&snap, &set, &mut SeededRandom::with_seed(11));
        assert_eq!(a, b);
    }
}
