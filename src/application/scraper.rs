//! Fetch → extract → clean pipeline for a single product page

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{PageFetcher, PriceWatchResult, PricedRecord, ProductExtractor, ProductRecord, clean_price};

/// Scrapes product records from e-commerce pages
#[derive(Clone)]
pub struct ProductScraper {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn ProductExtractor>,
}

impl ProductScraper {
    pub fn new(fetcher: Arc<dyn PageFetcher>, extractor: Arc<dyn ProductExtractor>) -> Self {
        Self { fetcher, extractor }
    }

    /// Fetch `url` and extract its product record
    pub async fn scrape(&self, url: &str) -> PriceWatchResult<ProductRecord> {
        let html = self.fetcher.fetch(url).await?;
        debug!("Fetched {} bytes from {}", html.len(), url);
        self.extractor.extract(&html, url)
    }

    /// Scrape `url` and clean its price text
    pub async fn scrape_price(&self, url: &str) -> PriceWatchResult<PricedRecord> {
        let record = self.scrape(url).await?;
        let price = clean_price(&record.price_text)?;
        info!("💲 {} at {}: {}", record.name, url, price);
        Ok(PricedRecord { record, price })
    }

    /// Scrape every URL in order, stopping at the first failure
    pub async fn scrape_all(&self, urls: &[String]) -> PriceWatchResult<Vec<ProductRecord>> {
        let mut records = Vec::with_capacity(urls.len());
        for url in urls {
            records.push(self.scrape(url).await?);
        }
        Ok(records)
    }

    /// Scrape and price every URL in order, stopping at the first failure
    pub async fn scrape_prices(&self, urls: &[String]) -> PriceWatchResult<Vec<PricedRecord>> {
        let mut observations = Vec::with_capacity(urls.len());
        for url in urls {
            observations.push(self.scrape_price(url).await?);
        }
        Ok(observations)
    }
}
