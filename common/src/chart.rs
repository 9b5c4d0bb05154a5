use serde::{Deserialize, Serialize};

use crate::market::PriceSeries;

/// Whether chart data came from the provider or was simulated after a failed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartSource {
    Live,
    Simulated,
}

/// Horizontal price zone drawn over a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartAnnotation {
    pub label: String,
    pub y_min: f64,
    pub y_max: f64,
}

/// Price/volume series plus indicator overlays for one asset chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub asset_id: String,
    pub source: ChartSource,
    pub series: PriceSeries,
    /// Same length as the series, `None` until 20 points of history exist
    pub sma20: Vec<Option<f64>>,
    pub ema50: Vec<f64>,
    pub rsi: f64,
    pub annotations: Vec<ChartAnnotation>,
}
