// Dynamic support and resistance
// Weighted blend of a tight band around price, a band around the 24h extremes,
// and a pull toward the all-time high/low

use common::MarketSnapshot;

use crate::random::RandomSource;

const TIGHT_WEIGHT: f64 = 0.6;
const EXTREME_WEIGHT: f64 = 0.3;
const HISTORIC_WEIGHT: f64 = 0.1;

/// Support/resistance estimate with 0-100 strength scores
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportResistance {
    pub support: f64,
    pub resistance: f64,
    pub support_strength: u8,
    pub resistance_strength: u8,
}

/// Estimate support and resistance for a snapshot.
///
/// Strength scores carry up to 20 points of jitter drawn from `rng`
/// (support first, then resistance).
pub fn support_resistance(
    snapshot: &MarketSnapshot,
    volatility_score: u32,
    rng: &mut dyn RandomSource,
) -> SupportResistance {
    let price = snapshot.current_price;
    let high = snapshot.high_or_estimate();
    let low = snapshot.low_or_estimate();

    let volatility_factor = (volatility_score as f64 / 100.0 * 1.5).min(1.0);

    let band = 0.03 + volatility_factor * 0.05;
    let tight_support = price * (1.0 - band);
    let tight_resistance = price * (1.0 + band);

    let extreme_support = low * (1.0 - volatility_factor * 0.02);
    let extreme_resistance = high * (1.0 + volatility_factor * 0.02);

    let ath_factor = match snapshot.ath {
        Some(ath) if price > 0.0 && price < ath => (ath - price) / price,
        _ => 0.0,
    };
    let atl_factor = match snapshot.atl {
        Some(atl) if price > 0.0 && atl > 0.0 && price > atl => (price - atl) / price,
        _ => 0.0,
    };

    let support = tight_support * TIGHT_WEIGHT
        + extreme_support * EXTREME_WEIGHT
        + price * (1.0 - atl_factor * 0.1) * HISTORIC_WEIGHT;
    let resistance = tight_resistance * TIGHT_WEIGHT
        + extreme_resistance * EXTREME_WEIGHT
        + price * (1.0 + ath_factor * 0.1) * HISTORIC_WEIGHT;

    let support_strength = strength(rng.next_f64(), volatility_factor, atl_factor);
    let resistance_strength = strength(rng.next_f64(), volatility_factor, ath_factor);

    SupportResistance {
        support,
        resistance,
        support_strength,
        resistance_strength,
    }
}

fn strength(jitter: f64, volatility_factor: f64, historic_factor: f64) -> u8 {
    let score = 40.0 + jitter * 20.0 + volatility_factor * 20.0 + (historic_factor * 100.0).min(20.0);
    score.floor().clamp(0.0, 100.0) as u8
}
