// Statistics Primitives
// Pure numeric functions over a chronological price sequence

/// Simple moving average.
///
/// One value per index with a full window, so the output is
/// `prices.len() - period + 1` long. Empty when there is not enough history.
pub fn sma(prices: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || prices.len() < period {
        return Vec::new();
    }

    prices
        .windows(period)
        .map(|window| window.iter().sum::<f64>() / period as f64)
        .collect()
}

/// Simple moving average aligned with the input: leading entries without a
/// full window are `None`.
pub fn sma_padded(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    let values = sma(prices, period);
    let lead = prices.len() - values.len();

    std::iter::repeat(None)
        .take(lead)
        .chain(values.into_iter().map(Some))
        .collect()
}

/// Exponential moving average seeded with the first price.
///
/// `k = 2 / (period + 1)`; output has the same length as the input.
pub fn ema(prices: &[f64], period: usize) -> Vec<f64> {
    let Some(&seed) = prices.first() else {
        return Vec::new();
    };

    let k = 2.0 / (period as f64 + 1.0);
    let mut result = Vec::with_capacity(prices.len());
    result.push(seed);

    for &price in &prices[1..] {
        let prev = result[result.len() - 1];
        result.push(prev * (1.0 - k) + price * k);
    }

    result
}

/// Mean of the first `period` values, divided by `period` even when fewer exist
pub fn average(values: &[f64], period: usize) -> f64 {
    if period == 0 {
        return 0.0;
    }
    values.iter().take(period).sum::<f64>() / period as f64
}

/// Single-window RSI over the first `period` price changes.
///
/// Not Wilder's recursive smoothing. Returns 100 when there were no losses.
pub fn rsi(prices: &[f64], period: usize) -> f64 {
    let period = period.max(1);

    let (gains, losses): (Vec<f64>, Vec<f64>) = prices
        .windows(2)
        .map(|w| {
            let change = w[1] - w[0];
            (change.max(0.0), (-change).max(0.0))
        })
        .unzip();

    let avg_gain = average(&gains, period);
    let avg_loss = average(&losses, period);

    if avg_loss == 0.0 {
        return 100.0;
    }

    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}

/// Population standard deviation of the last `period` values.
///
/// The mean is taken over the same window. A `period` of zero or longer
/// than the input uses the whole input.
pub fn standard_deviation(values: &[f64], period: usize) -> f64 {
    let window = if period == 0 || period >= values.len() {
        values
    } else {
        &values[values.len() - period..]
    };

    if window.is_empty() {
        return 0.0;
    }

    let n = window.len() as f64;
    let mean = window.iter().sum::<f64>() / n;
    let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}
