// Offline dataset
// Served when the provider is unreachable; shares the live schema exactly

use common::{
    KeyLevels, MacdSignal, MarketSnapshot, Signal, SignalIndicators, SignalType, Trend,
    VolumeProfile,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn snapshot(id: &str, symbol: &str, name: &str, price: f64, change: f64, market_cap: f64) -> MarketSnapshot {
    MarketSnapshot {
        id: id.to_string(),
        symbol: symbol.to_string(),
        name: name.to_string(),
        current_price: price,
        high_24h: None,
        low_24h: None,
        volume_24h: 0.0,
        market_cap,
        market_cap_rank: None,
        price_change_pct_24h: Some(change),
        ath: None,
        atl: None,
    }
}

/// Market overview used when the live list cannot be fetched
pub fn offline_snapshots() -> Vec<MarketSnapshot> {
    vec![
        snapshot("bitcoin", "BTC", "Bitcoin", 69_420.0, 2.5, 1_300_000_000_000.0),
        snapshot("ethereum", "ETH", "Ethereum", 3_500.0, 1.8, 420_000_000_000.0),
        snapshot("ripple", "XRP", "XRP", 0.55, -0.9, 28_000_000_000.0),
        snapshot("cardano", "ADA", "Cardano", 0.45, 3.2, 16_000_000_000.0),
        snapshot("solana", "SOL", "Solana", 142.0, 5.7, 62_000_000_000.0),
        snapshot("dogecoin", "DOGE", "Dogecoin", 0.14, -1.3, 19_000_000_000.0),
        snapshot("polkadot", "DOT", "Polkadot", 6.8, 0.5, 8_400_000_000.0),
        snapshot("digibyte", "DGB", "DigiByte", 0.0089, 7.4, 149_000_000.0),
    ]
}

struct OfflineSignal {
    id: &'static str,
    symbol: &'static str,
    name: &'static str,
    signal_type: SignalType,
    pattern: &'static str,
    // entry, target, stop, support, resistance
    levels: [Decimal; 5],
    strengths: (u8, u8),
    potential_gain: Decimal,
    risk_reward: &'static str,
    confidence: u8,
    price_change_24h: Decimal,
    volume_24h: f64,
    market_cap: f64,
    indicators: (u32, MacdSignal, Trend),
    ai_prediction: &'static str,
    is_premium: bool,
}

impl From<OfflineSignal> for Signal {
    fn from(s: OfflineSignal) -> Self {
        let [entry_price, target_price, stop_loss, support, resistance] = s.levels;
        Signal {
            id: s.id.to_string(),
            pair: format!("{}/USDT", s.symbol),
            name: s.name.to_string(),
            signal_type: s.signal_type,
            pattern: s.pattern.to_string(),
            confidence: s.confidence,
            levels: KeyLevels {
                entry_price,
                target_price,
                stop_loss,
                support,
                resistance,
                support_strength: s.strengths.0,
                resistance_strength: s.strengths.1,
            },
            potential_gain: s.potential_gain,
            risk_reward: s.risk_reward.to_string(),
            price_change_24h: s.price_change_24h,
            volume_24h: s.volume_24h,
            market_cap: s.market_cap,
            indicators: SignalIndicators {
                rsi: s.indicators.0,
                macd: s.indicators.1,
                trend: s.indicators.2,
            },
            ai_prediction: s.ai_prediction.to_string(),
            volume_profile: VolumeProfile::default(),
            is_premium: s.is_premium,
        }
    }
}

/// Curated signal list used when live generation yields nothing
pub fn offline_signals() -> Vec<Signal> {
    let signals = vec![
        OfflineSignal {
            id: "bitcoin",
            symbol: "BTC",
            name: "Bitcoin",
            signal_type: SignalType::Buy,
            pattern: "Bullish Breakout",
            levels: [dec!(69420), dec!(75000), dec!(65000), dec!(68500), dec!(71200)],
            strengths: (85, 75),
            potential_gain: dec!(8.04),
            risk_reward: "1:1.26",
            confidence: 88,
            price_change_24h: dec!(2.50),
            volume_24h: 28_000_000_000.0,
            market_cap: 1_300_000_000_000.0,
            indicators: (62, MacdSignal::Bullish, Trend::Bullish),
            ai_prediction: "Strong buy opportunity with high confidence level. Technical indicators suggest potential for significant upward movement.",
            is_premium: true,
        },
        OfflineSignal {
            id: "ripple",
            symbol: "XRP",
            name: "Ripple",
            signal_type: SignalType::Buy,
            pattern: "Double Bottom",
            levels: [dec!(0.55), dec!(0.68), dec!(0.49), dec!(0.52), dec!(0.61)],
            strengths: (79, 66),
            potential_gain: dec!(23.64),
            risk_reward: "1:2.16",
            confidence: 77,
            price_change_24h: dec!(-0.90),
            volume_24h: 980_000_000.0,
            market_cap: 28_000_000_000.0,
            indicators: (49, MacdSignal::Neutral, Trend::Neutral),
            ai_prediction: "Potential buy opportunity at support level. Current consolidation phase might lead to upward breakout.",
            is_premium: true,
        },
        OfflineSignal {
            id: "polkadot",
            symbol: "DOT",
            name: "Polkadot",
            signal_type: SignalType::Buy,
            pattern: "Cup and Handle",
            levels: [dec!(6.80), dec!(8.40), dec!(6.10), dec!(6.50), dec!(7.20)],
            strengths: (73, 62),
            potential_gain: dec!(23.53),
            risk_reward: "1:2.29",
            confidence: 75,
            price_change_24h: dec!(0.50),
            volume_24h: 410_000_000.0,
            market_cap: 8_400_000_000.0,
            indicators: (54, MacdSignal::Bullish, Trend::Neutral),
            ai_prediction: "Buy signal with favorable risk-reward ratio. Pattern formation suggests potential for extended upward movement.",
            is_premium: false,
        },
        OfflineSignal {
            id: "dogecoin",
            symbol: "DOGE",
            name: "Dogecoin",
            signal_type: SignalType::Sell,
            pattern: "Rising Wedge",
            levels: [dec!(0.14), dec!(0.11), dec!(0.16), dec!(0.13), dec!(0.15)],
            strengths: (65, 81),
            potential_gain: dec!(21.43),
            risk_reward: "1:1.5",
            confidence: 73,
            price_change_24h: dec!(-1.30),
            volume_24h: 820_000_000.0,
            market_cap: 19_000_000_000.0,
            indicators: (67, MacdSignal::Bearish, Trend::Bearish),
            ai_prediction: "Sell signal as price approaches resistance zone. Technical pattern suggests potential reversal.",
            is_premium: false,
        },
        OfflineSignal {
            id: "ethereum",
            symbol: "ETH",
            name: "Ethereum",
            signal_type: SignalType::Buy,
            pattern: "Accumulation",
            levels: [dec!(3500), dec!(3950), dec!(3250), dec!(3400), dec!(3700)],
            strengths: (78, 65),
            potential_gain: dec!(12.86),
            risk_reward: "1:1.8",
            confidence: 82,
            price_change_24h: dec!(1.80),
            volume_24h: 15_000_000_000.0,
            market_cap: 420_000_000_000.0,
            indicators: (58, MacdSignal::Bullish, Trend::Bullish),
            ai_prediction: "Strong buy opportunity ahead of network upgrade. Technical analysis indicates increased adoption and demand.",
            is_premium: true,
        },
        OfflineSignal {
            id: "digibyte",
            symbol: "DGB",
            name: "DigiByte",
            signal_type: SignalType::Buy,
            pattern: "Oversold Bounce",
            levels: [dec!(0.0089), dec!(0.0125), dec!(0.0075), dec!(0.0081), dec!(0.0098)],
            strengths: (72, 68),
            potential_gain: dec!(40.45),
            risk_reward: "1:2.57",
            confidence: 76,
            price_change_24h: dec!(7.40),
            volume_24h: 5_900_000.0,
            market_cap: 149_000_000.0,
            indicators: (42, MacdSignal::Bullish, Trend::Neutral),
            ai_prediction: "Potential breakout from accumulation zone. RSI indicates oversold conditions.",
            is_premium: false,
        },
        OfflineSignal {
            id: "solana",
            symbol: "SOL",
            name: "Solana",
            signal_type: SignalType::Buy,
            pattern: "Momentum",
            levels: [dec!(142), dec!(168), dec!(130), dec!(138), dec!(150)],
            strengths: (81, 70),
            potential_gain: dec!(18.31),
            risk_reward: "1:2.17",
            confidence: 86,
            price_change_24h: dec!(5.70),
            volume_24h: 3_200_000_000.0,
            market_cap: 62_000_000_000.0,
            indicators: (68, MacdSignal::Bullish, Trend::Bullish),
            ai_prediction: "Strong buy with increasing ecosystem adoption. Technical indicators very favorable.",
            is_premium: true,
        },
        OfflineSignal {
            id: "cardano",
            symbol: "ADA",
            name: "Cardano",
            signal_type: SignalType::Buy,
            pattern: "Rounding Bottom",
            levels: [dec!(0.45), dec!(0.54), dec!(0.41), dec!(0.435), dec!(0.48)],
            strengths: (75, 63),
            potential_gain: dec!(20.00),
            risk_reward: "1:2.25",
            confidence: 73,
            price_change_24h: dec!(3.20),
            volume_24h: 650_000_000.0,
            market_cap: 16_000_000_000.0,
            indicators: (55, MacdSignal::Bullish, Trend::Neutral),
            ai_prediction: "Favorable entry point detected with moderate confidence. Bullish momentum building.",
            is_premium: false,
        },
    ];

    signals.into_iter().map(Signal::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_dataset_sizes() {
        assert_eq!(offline_snapshots().len(), 8);
        assert_eq!(offline_signals().len(), 8);
    }

    #[test]
    fn test_offline_signals_respect_invariants() {
        for signal in offline_signals() {
            assert!(signal.confidence <= 100, "{} confidence out of range", signal.id);
            assert!(signal.risk_reward.starts_with("1:"));
            assert!(signal.pair.ends_with("/USDT"));
        }
    }

    #[test]
    fn test_every_offline_signal_has_a_snapshot() {
        let snapshots = offline_snapshots();
        for signal in offline_signals() {
            assert!(snapshots.iter().any(|s| s.id == signal.id), "missing snapshot for {}", signal.id);
        }
    }
}
