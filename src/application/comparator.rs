//! Cross-source price comparison with threshold alerting

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::report::alert_message;
use super::scraper::ProductScraper;
use crate::domain::{
    DEFAULT_ALERT_SUBJECT, HistoryStore, Notifier, Price, PriceWatchResult, PricedRecord, PricingAnalyzer,
    PricingStrategy, PricingSummary,
};

/// Outcome of the alert side effect of one comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    NotTriggered,
    Sent,
    Failed(String),
}

impl AlertStatus {
    pub fn is_triggered(&self) -> bool {
        !matches!(self, Self::NotTriggered)
    }
}

/// Everything observed during one comparison
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub product: String,
    pub observations: Vec<PricedRecord>,
    pub summary: PricingSummary,
    pub strategy: PricingStrategy,
    pub alert: AlertStatus,
}

/// Compares one product's price across several shops and keeps its history
pub struct PriceComparator {
    scraper: ProductScraper,
    notifier: Arc<dyn Notifier>,
    analyzer: PricingAnalyzer,
    history: HistoryStore,
    subject: String,
}

impl PriceComparator {
    pub fn new(scraper: ProductScraper, notifier: Arc<dyn Notifier>, analyzer: PricingAnalyzer) -> Self {
        Self {
            scraper,
            notifier,
            analyzer,
            history: HistoryStore::with_analyzer(analyzer),
            subject: DEFAULT_ALERT_SUBJECT.to_string(),
        }
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn analyzer(&self) -> &PricingAnalyzer {
        &self.analyzer
    }

    /// Prices observed by every successful comparison so far
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Compare `product` across `urls` and return the price summary
    ///
    /// Sends one alert when the spread reaches the analyzer threshold.
    pub async fn compare(&mut self, product: &str, urls: &[String]) -> PriceWatchResult<PricingSummary> {
        self.compare_detailed(product, urls).await.map(|report| report.summary)
    }

    /// Same as [`compare`](Self::compare), keeping the observations and alert outcome
    ///
    /// URLs are scraped in order; the first failure aborts the comparison and
    /// leaves the history untouched.
    pub async fn compare_detailed(&mut self, product: &str, urls: &[String]) -> PriceWatchResult<ComparisonReport> {
        info!("🔍 Comparing '{}' across {} source(s)", product, urls.len());

        let observations = self.scraper.scrape_prices(urls).await.inspect_err(|e| {
            warn!("❌ Comparison of '{}' aborted: {}", product, e);
        })?;

        let prices: Vec<Price> = observations.iter().map(|o| o.price).collect();
        let summary = self.analyzer.summarize(&prices)?;
        let strategy = self.analyzer.classify(&summary);

        for price in &prices {
            self.history.track(product, *price);
        }

        let alert = if self.analyzer.is_wide_gap(&summary) {
            self.send_alert(product, &observations, &summary).await
        } else {
            AlertStatus::NotTriggered
        };

        info!(
            "📊 '{}': mean {} min {} max {} ({})",
            product,
            summary.mean,
            summary.min,
            summary.max,
            strategy.as_str()
        );

        Ok(ComparisonReport {
            product: product.to_string(),
            observations,
            summary,
            strategy,
            alert,
        })
    }

    async fn send_alert(&self, product: &str, observations: &[PricedRecord], summary: &PricingSummary) -> AlertStatus {
        info!(
            "🔔 Spread {:.2} for '{}' reached threshold {:.2}",
            summary.spread(),
            product,
            self.analyzer.gap_threshold()
        );

        let body = alert_message(product, observations);
        match self.notifier.notify(&self.subject, &body).await {
            Ok(()) => AlertStatus::Sent,
            Err(e) => {
                warn!("⚠️ Alert for '{}' via {} failed: {}", product, self.notifier.channel(), e);
                AlertStatus::Failed(e.to_string())
            }
        }
    }
}
