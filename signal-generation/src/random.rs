// Random source
// Every random draw in signal generation goes through this trait so runs can be seeded

use common::PriceSeries;

/// Source of uniform random numbers
pub trait RandomSource: Send {
    /// Uniform in `[0, 1)`
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        let idx = (self.next_f64() * len as f64) as usize;
        idx.min(len.saturating_sub(1))
    }
}

/// `fastrand`-backed source, optionally seeded for reproducible cycles
pub struct SeededRandom {
    rng: fastrand::Rng,
}

impl SeededRandom {
    /// Entropy-seeded
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::with_seed)
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.f64()
    }
}

const SIM_VOLATILITY: f64 = 0.02;
const SIM_DRIFT: f64 = 0.001;
const SIM_FLOOR: f64 = 0.01;

/// Random walk with slight upward drift, starting in `[100, 1000)`
pub fn simulate_prices(rng: &mut dyn RandomSource, len: usize) -> Vec<f64> {
    if len == 0 {
        return Vec::new();
    }

    let mut prices = Vec::with_capacity(len);
    prices.push(100.0 + rng.next_f64() * 900.0);

    for _ in 1..len {
        let prev = prices[prices.len() - 1];
        let random_move = (rng.next_f64() - 0.5) * SIM_VOLATILITY * prev;
        let drift_move = SIM_DRIFT * prev;
        prices.push((prev + random_move + drift_move).max(SIM_FLOOR));
    }

    prices
}

/// Independent volumes in `[0, 1_000_000)`
pub fn simulate_volumes(rng: &mut dyn RandomSource, len: usize) -> Vec<f64> {
    (0..len).map(|_| rng.next_f64() * 1_000_000.0).collect()
}

/// Simulated price series with parallel volumes, used when no history is available
pub fn simulate_series(rng: &mut dyn RandomSource, len: usize) -> PriceSeries {
    let prices = simulate_prices(rng, len);
    let volumes = simulate_volumes(rng, len);
    PriceSeries::new(prices, volumes)
}
