//! Competitive pricing analysis over a sequence of observed prices

use super::errors::{PriceWatchError, PriceWatchResult};
use super::pricing::{Price, PricingStrategy, PricingSummary};

/// Spread at or above which the price gap is considered too wide
pub const DEFAULT_GAP_THRESHOLD: f64 = 10.0;

/// Subject line of a price variation alert
pub const DEFAULT_ALERT_SUBJECT: &str = "Price Variation Alert";

/// Aggregates prices and classifies the spread between sources
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingAnalyzer {
    gap_threshold: f64,
}

impl Default for PricingAnalyzer {
    fn default() -> Self {
        Self {
            gap_threshold: DEFAULT_GAP_THRESHOLD,
        }
    }
}

impl PricingAnalyzer {
    pub fn with_threshold(gap_threshold: f64) -> Self {
        Self { gap_threshold }
    }

    pub fn gap_threshold(&self) -> f64 {
        self.gap_threshold
    }

    /// Arithmetic mean, minimum and maximum of `prices`
    ///
    /// The mean is clamped into `[min, max]`; summation rounding can otherwise
    /// push it a few ulps outside for runs of identical prices.
    pub fn summarize(&self, prices: &[Price]) -> PriceWatchResult<PricingSummary> {
        let Some(first) = prices.first() else {
            return Err(PriceWatchError::EmptyInput);
        };

        let (mut min, mut max, mut sum) = (first.value(), first.value(), 0.0);
        for price in prices {
            let value = price.value();
            min = min.min(value);
            max = max.max(value);
            sum += value;
        }

        #[allow(clippy::cast_precision_loss)]
        let mean = (sum / prices.len() as f64).clamp(min, max);

        Ok(PricingSummary { mean, min, max })
    }

    /// Classify the spread of `prices` against the configured threshold
    pub fn strategy(&self, prices: &[Price]) -> PricingStrategy {
        match self.summarize(prices) {
            Ok(summary) => self.classify(&summary),
            Err(_) => PricingStrategy::NoData,
        }
    }

    /// Classify an already computed summary
    pub fn classify(&self, summary: &PricingSummary) -> PricingStrategy {
        if self.is_wide_gap(summary) {
            PricingStrategy::WideGap
        } else {
            PricingStrategy::AcceptableGap
        }
    }

    pub fn is_wide_gap(&self, summary: &PricingSummary) -> bool {
        summary.spread() >= self.gap_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prices(values: &[f64]) -> Vec<Price> {
        values.iter().map(|v| Price::new(*v).unwrap()).collect()
    }

    #[test]
    fn test_summarize_empty_fails() {
        let analyzer = PricingAnalyzer::default();
        assert_eq!(analyzer.summarize(&[]), Err(PriceWatchError::EmptyInput));
    }

    #[test]
    fn test_summarize_single_price() {
        let analyzer = PricingAnalyzer::default();
        let summary = analyzer.summarize(&prices(&[5.0])).unwrap();
        assert_eq!(summary, PricingSummary { mean: 5.0, min: 5.0, max: 5.0 });
    }

    #[test]
    fn test_summarize_mixed_prices() {
        let analyzer = PricingAnalyzer::default();
        let summary = analyzer.summarize(&prices(&[30.0, 10.0, 20.0])).unwrap();
        assert_eq!(summary.min, 10.0);
        assert_eq!(summary.max, 30.0);
        assert!((summary.mean - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_mean_stays_within_bounds_for_repeated_values() {
        let analyzer = PricingAnalyzer::default();
        let summary = analyzer.summarize(&prices(&[0.1, 0.1, 0.1])).unwrap();
        assert!(summary.min <= summary.mean && summary.mean <= summary.max);
    }

    #[test]
    fn test_strategy_labels_by_gap() {
        let analyzer = PricingAnalyzer::default();
        assert_eq!(analyzer.strategy(&prices(&[10.0, 25.0])).as_str(), "wide_gap");
        assert_eq!(analyzer.strategy(&prices(&[10.0, 15.0])).as_str(), "acceptable_gap");
        assert_eq!(analyzer.strategy(&[]).as_str(), "no_data");
    }

    #[test]
    fn test_gap_equal_to_threshold_is_wide() {
        let analyzer = PricingAnalyzer::default();
        assert_eq!(analyzer.strategy(&prices(&[10.0, 20.0])), PricingStrategy::WideGap);
    }

    #[test]
    fn test_custom_threshold() {
        let analyzer = PricingAnalyzer::with_threshold(2.5);
        assert_eq!(analyzer.gap_threshold(), 2.5);
        assert_eq!(analyzer.strategy(&prices(&[10.0, 13.0])), PricingStrategy::WideGap);
        assert_eq!(analyzer.strategy(&prices(&[10.0, 12.0])), PricingStrategy::AcceptableGap);
    }
}
