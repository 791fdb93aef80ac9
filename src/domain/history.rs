//! Process-lifetime price history per product

use std::collections::HashMap;

use tracing::debug;

use super::analyzer::PricingAnalyzer;
use super::errors::{PriceWatchError, PriceWatchResult};
use super::pricing::{Price, PricingSummary};

/// Append-only record of observed prices keyed by product name
#[derive(Debug, Default, Clone)]
pub struct HistoryStore {
    entries: HashMap<String, Vec<Price>>,
    analyzer: PricingAnalyzer,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `analyzer` for trend summaries instead of the default one
    pub fn with_analyzer(analyzer: PricingAnalyzer) -> Self {
        Self {
            entries: HashMap::new(),
            analyzer,
        }
    }

    pub fn track(&mut self, product: &str, price: Price) {
        let series = self.entries.entry(product.to_string()).or_default();
        series.push(price);
        debug!("Tracked {} for '{}' ({} observations)", price, product, series.len());
    }

    /// Full observation sequence for `product`; empty when it was never tracked
    pub fn history(&self, product: &str) -> &[Price] {
        self.entries.get(product).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn trend_summary(&self, product: &str) -> PriceWatchResult<PricingSummary> {
        let series = self
            .entries
            .get(product)
            .ok_or_else(|| PriceWatchError::unknown_product(product))?;
        self.analyzer.summarize(series)
    }

    /// Tracked product names in alphabetical order
    pub fn products(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
