//! Collaborator interfaces used by the application layer
//!
//! Page retrieval, markup extraction and alert delivery are kept behind these
//! traits so the comparison logic can run against real adapters or in-memory
//! fakes.

use async_trait::async_trait;

use super::errors::PriceWatchResult;
use super::product::ProductRecord;

/// Retrieves raw page content for a URL
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Network failures and non-success statuses surface as `PriceWatchError::Fetch`
    async fn fetch(&self, url: &str) -> PriceWatchResult<String>;
}

/// Turns page markup into a structured product record
pub trait ProductExtractor: Send + Sync {
    /// Missing elements surface as `PriceWatchError::Extraction`
    fn extract(&self, html: &str, url: &str) -> PriceWatchResult<ProductRecord>;
}

/// Delivers an alert message through an external channel
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, subject: &str, body: &str) -> PriceWatchResult<()>;

    /// Short channel name used in logs
    fn channel(&self) -> &'static str;
}
