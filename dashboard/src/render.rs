// Terminal rendering
// Text cards for the market overview, signals and charts

use std::fmt::Write;

use common::{format_compact, ChartData, ChartSource, MarketSnapshot, Signal, SignalBatch};

use crate::registry::ChartWidget;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const SPARK_WIDTH: usize = 48;

/// 6 decimals below $1, 4 below $10, otherwise 2
pub fn display_price(price: f64) -> String {
    if price < 1.0 {
        format!("${:.6}", price)
    } else if price < 10.0 {
        format!("${:.4}", price)
    } else {
        format!("${:.2}", price)
    }
}

fn change_arrow(change: f64) -> char {
    if change > 0.0 {
        '▲'
    } else {
        '▼'
    }
}

pub fn render_overview(assets: &[MarketSnapshot]) -> String {
    let mut out = String::from("MARKET OVERVIEW\n");

    for asset in assets {
        let change = asset.price_change_24h();
        let _ = writeln!(
            out,
            "  {:<18} {:<6} {:>16}  {} {:>6.2}%  cap ${}",
            asset.name,
            asset.symbol,
            display_price(asset.current_price),
            change_arrow(change),
            change.abs(),
            format_compact(asset.market_cap),
        );
    }

    out
}

pub fn render_signal(signal: &Signal) -> String {
    let mut out = String::new();
    let premium = if signal.is_premium { "  [PREMIUM]" } else { "" };

    let _ = writeln!(
        out,
        "{} {:?}{}  ({})",
        signal.pair, signal.signal_type, premium, signal.pattern
    );
    let _ = writeln!(out, "  Confidence   {}%", signal.confidence);
    let _ = writeln!(
        out,
        "  Entry ${}  Target ${}  Stop ${}",
        signal.levels.entry_price, signal.levels.target_price, signal.levels.stop_loss
    );
    let _ = writeln!(
        out,
        "  Support ${} ({})  Resistance ${} ({})",
        signal.levels.support,
        signal.levels.support_strength,
        signal.levels.resistance,
        signal.levels.resistance_strength
    );
    let _ = writeln!(
        out,
        "  Risk/Reward {}  Potential Gain +{}%  Vol ${}",
        signal.risk_reward,
        signal.potential_gain,
        format_compact(signal.volume_24h)
    );
    let _ = writeln!(
        out,
        "  RSI: {}  MACD: {:?}  Trend: {:?}",
        signal.indicators.rsi, signal.indicators.macd, signal.indicators.trend
    );
    let _ = writeln!(out, "  {}", signal.ai_prediction);

    out
}

pub fn render_signals(batch: &SignalBatch) -> String {
    let mut out = format!(
        "SIGNALS ({} {:?}, {})\n",
        batch.len(),
        batch.source,
        batch.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    for signal in &batch.signals {
        out.push_str(&render_signal(signal));
        out.push('\n');
    }

    out
}

/// Block-character sparkline of `prices`, downsampled to at most `width` points
pub fn sparkline(prices: &[f64], width: usize) -> String {
    if prices.is_empty() || width == 0 {
        return String::new();
    }

    let step = prices.len().div_ceil(width);
    let sampled: Vec<f64> = prices.iter().step_by(step.max(1)).copied().collect();

    let min = sampled.iter().copied().fold(f64::INFINITY, f64::min);
    let max = sampled.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    sampled
        .iter()
        .map(|p| {
            if range <= 0.0 {
                SPARK_LEVELS[0]
            } else {
                let idx = ((p - min) / range * (SPARK_LEVELS.len() - 1) as f64).round() as usize;
                SPARK_LEVELS[idx.min(SPARK_LEVELS.len() - 1)]
            }
        })
        .collect()
}

/// Text chart held in the registry until disposed
pub struct TextChart {
    pub symbol: String,
    lines: Vec<String>,
}

impl TextChart {
    pub fn new(symbol: &str, chart: &ChartData) -> Self {
        let mut lines = Vec::new();

        let source = match chart.source {
            ChartSource::Live => "",
            ChartSource::Simulated => " (simulated)",
        };
        lines.push(format!(
            "{} {} points{}",
            symbol,
            chart.series.len(),
            source
        ));
        lines.push(format!("  {}", sparkline(&chart.series.prices, SPARK_WIDTH)));

        let last_sma = chart.sma20.iter().rev().find_map(|v| *v);
        let last_ema = chart.ema50.last().copied();
        lines.push(format!(
            "  SMA 20 {}  EMA 50 {}  RSI {:.1}",
            last_sma.map_or("-".to_string(), display_price),
            last_ema.map_or("-".to_string(), display_price),
            chart.rsi
        ));

        for zone in &chart.annotations {
            lines.push(format!(
                "  {} {} - {}",
                zone.label,
                display_price(zone.y_min),
                display_price(zone.y_max)
            ));
        }

        Self {
            symbol: symbol.to_string(),
            lines,
        }
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_disposed(&self) -> bool {
        self.lines.is_empty()
    }
}

impl ChartWidget for TextChart {
    fn dispose(&mut self) {
        self.lines.clear();
    }
}
