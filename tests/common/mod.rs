//! In-memory collaborators shared by the integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use price_watch_lib::application::ProductScraper;
use price_watch_lib::domain::{Notifier, PageFetcher, PriceWatchError, PriceWatchResult};
use price_watch_lib::infrastructure::ProductPageParser;

/// Minimal product page matching the default selectors
pub fn product_page(name: &str, price_text: &str) -> String {
    format!(
        r#"<html><body>
            <h1 class="product-name">{name}</h1>
            <span class="price">{price_text}</span>
            <div class="description"><p>A sturdy  {name}</p></div>
            <span class="availability">In stock</span>
        </body></html>"#
    )
}

/// Serves canned pages by URL and counts every request
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn with_page(mut self, url: &str, html: String) -> Self {
        self.pages.insert(url.to_string(), html);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> PriceWatchResult<String> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| PriceWatchError::http_status(url, 404))
    }
}

/// Records every alert it is asked to deliver
#[derive(Default)]
pub struct CountingNotifier {
    sent: Mutex<Vec<(String, String)>>,
}

impl CountingNotifier {
    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn messages(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for CountingNotifier {
    async fn notify(&self, subject: &str, body: &str) -> PriceWatchResult<()> {
        self.sent.lock().unwrap().push((subject.to_string(), body.to_string()));
        Ok(())
    }

    fn channel(&self) -> &'static str {
        "counting"
    }
}

/// Fails every delivery attempt
#[derive(Default)]
pub struct FailingNotifier {
    attempts: AtomicUsize,
}

impl FailingNotifier {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify(&self, _subject: &str, _body: &str) -> PriceWatchResult<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(PriceWatchError::notification("relay refused connection"))
    }

    fn channel(&self) -> &'static str {
        "failing"
    }
}

/// Scraper over `fetcher` using the real page parser
pub fn scraper(fetcher: Arc<FakeFetcher>) -> ProductScraper {
    ProductScraper::new(fetcher, Arc::new(ProductPageParser::new().unwrap()))
}

pub fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}
