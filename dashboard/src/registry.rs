// Chart registry
// Owns the live chart widgets, one per symbol

use std::collections::HashMap;

use tracing::debug;

/// A rendered chart holding resources that must be released explicitly
pub trait ChartWidget {
    fn dispose(&mut self);
}

/// Active chart widgets keyed by symbol.
///
/// A widget is always disposed before it is replaced or dropped from the registry.
pub struct ChartRegistry<W: ChartWidget> {
    widgets: HashMap<String, W>,
}

impl<W: ChartWidget> ChartRegistry<W> {
    pub fn new() -> Self {
        Self {
            widgets: HashMap::new(),
        }
    }

    /// Install `widget` for `symbol`, disposing any widget it replaces
    pub fn replace(&mut self, symbol: &str, widget: W) {
        if let Some(mut previous) = self.widgets.remove(symbol) {
            debug!("Disposing chart for {}", symbol);
            previous.dispose();
        }
        self.widgets.insert(symbol.to_string(), widget);
    }

    pub fn get(&self, symbol: &str) -> Option<&W> {
        self.widgets.get(symbol)
    }

    /// Remove and dispose the widget for `symbol`. Returns whether one existed.
    pub fn remove(&mut self, symbol: &str) -> bool {
        match self.widgets.remove(symbol) {
            Some(mut widget) => {
                widget.dispose();
                true
            }
            None => false,
        }
    }

    pub fn dispose_all(&mut self) {
        for (symbol, mut widget) in self.widgets.drain() {
            debug!("Disposing chart for {}", symbol);
            widget.dispose();
        }
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

impl<W: ChartWidget> Default for ChartRegistry<W> {
    fn default() -> Self {
        Self::new()
    }
}
