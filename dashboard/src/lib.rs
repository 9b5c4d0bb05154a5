// Crypto Signal Dashboard (Layer 3)
// Terminal consumer of the signal pipeline: overview, signal cards and charts

pub mod registry;
pub mod render;

pub use registry::{ChartRegistry, ChartWidget};
pub use render::{display_price, render_overview, render_signal, render_signals, sparkline, TextChart};
