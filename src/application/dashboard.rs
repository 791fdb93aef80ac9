//! Product catalog with on-demand views of scraped data

use std::collections::BTreeMap;

use tracing::info;

use super::scraper::ProductScraper;
use crate::domain::{Price, PriceWatchError, PriceWatchResult, ProductRecord, ProductTarget};

/// Maps each tracked product to the ordered list of pages selling it
pub struct Dashboard {
    scraper: ProductScraper,
    catalog: BTreeMap<String, Vec<String>>,
}

impl Dashboard {
    pub fn new(scraper: ProductScraper) -> Self {
        Self {
            scraper,
            catalog: BTreeMap::new(),
        }
    }

    /// Build a dashboard pre-filled with configured catalog entries
    pub fn with_catalog(scraper: ProductScraper, targets: &[ProductTarget]) -> Self {
        let mut dashboard = Self::new(scraper);
        for target in targets {
            dashboard.add_product(&target.name, target.urls.clone());
        }
        dashboard
    }

    /// Register `product`, replacing any URLs it already had
    pub fn add_product(&mut self, product: &str, urls: Vec<String>) {
        info!("📦 Catalog entry '{}' with {} URL(s)", product, urls.len());
        self.catalog.insert(product.to_string(), urls);
    }

    pub fn urls(&self, product: &str) -> PriceWatchResult<&[String]> {
        self.catalog
            .get(product)
            .map(Vec::as_slice)
            .ok_or_else(|| PriceWatchError::unknown_product(product))
    }

    /// Product names in alphabetical order
    pub fn products(&self) -> Vec<&str> {
        self.catalog.keys().map(String::as_str).collect()
    }

    /// Scrape every page of `product`, in catalog order
    pub async fn view_scraped_data(&self, product: &str) -> PriceWatchResult<Vec<ProductRecord>> {
        let urls = self.urls(product)?;
        self.scraper.scrape_all(urls).await
    }

    /// Current price of `product` on each of its pages, in catalog order
    pub async fn pricing_trends(&self, product: &str) -> PriceWatchResult<Vec<Price>> {
        let urls = self.urls(product)?;
        let observations = self.scraper.scrape_prices(urls).await?;
        Ok(observations.into_iter().map(|o| o.price).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PageFetcher, ProductExtractor};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct UnreachableFetcher;

    #[async_trait]
    impl PageFetcher for UnreachableFetcher {
        async fn fetch(&self, url: &str) -> PriceWatchResult<String> {
            Err(PriceWatchError::network(url, "unreachable"))
        }
    }

    struct NoExtractor;

    impl ProductExtractor for NoExtractor {
        fn extract(&self, _html: &str, url: &str) -> PriceWatchResult<ProductRecord> {
            Err(PriceWatchError::extraction("name", url, Vec::new()))
        }
    }

    fn dashboard() -> Dashboard {
        Dashboard::new(ProductScraper::new(Arc::new(UnreachableFetcher), Arc::new(NoExtractor)))
    }

    #[test]
    fn test_products_listed_alphabetically() {
        let mut dashboard = dashboard();
        dashboard.add_product("Toaster", vec!["https://a.example/t".to_string()]);
        dashboard.add_product("Kettle", Vec::new());

        assert_eq!(dashboard.products(), vec!["Kettle", "Toaster"]);
    }

    #[test]
    fn test_add_product_replaces_urls() {
        let mut dashboard = dashboard();
        dashboard.add_product("Kettle", vec!["https://a.example/k".to_string()]);
        dashboard.add_product("Kettle", vec!["https://b.example/k".to_string()]);

        assert_eq!(dashboard.urls("Kettle").unwrap(), ["https://b.example/k".to_string()]);
    }

    #[tokio::test]
    async fn test_unknown_product_is_rejected() {
        let dashboard = dashboard();
        assert!(matches!(
            dashboard.view_scraped_data("Kettle").await,
            Err(PriceWatchError::UnknownProduct { .. })
        ));
        assert!(matches!(
            dashboard.pricing_trends("Kettle").await,
            Err(PriceWatchError::UnknownProduct { .. })
        ));
    }

    #[tokio::test]
    async fn test_product_without_urls_has_no_data() {
        let mut dashboard = dashboard();
        dashboard.add_product("Kettle", Vec::new());

        assert!(dashboard.view_scraped_data("Kettle").await.unwrap().is_empty());
        assert!(dashboard.pricing_trends("Kettle").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let mut dashboard = dashboard();
        dashboard.add_product("Kettle", vec!["https://a.example/k".to_string()]);

        let err = dashboard.view_scraped_data("Kettle").await.unwrap_err();
        assert_eq!(err.url(), Some("https://a.example/k"));
    }
}
