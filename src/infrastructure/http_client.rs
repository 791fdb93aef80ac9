//! HTTP client for fetching product pages with rate limiting and error handling
//!
//! Requests are bounded by a timeout and spaced by a `governor` rate limiter.
//! There is no retry: any transport failure or non-success status is reported
//! to the caller as a fetch error.

use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, direct::NotKeyed},
};
use reqwest::{
    Client,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{PageFetcher, PriceWatchError, PriceWatchResult};
use crate::infrastructure::config::{HttpSettings, defaults};

/// HTTP client configuration for page fetching
#[derive(Debug, Clone, Serialize)]
pub struct HttpClientConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_requests_per_second: u32,
    pub follow_redirects: bool,
}

impl HttpClientConfig {
    pub fn from_settings(settings: &HttpSettings) -> Self {
        Self {
            user_agent: settings.user_agent.clone(),
            timeout_seconds: settings.timeout_seconds,
            max_requests_per_second: settings.max_requests_per_second,
            follow_redirects: settings.follow_redirects,
        }
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::USER_AGENT.to_string(),
            timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            max_requests_per_second: defaults::MAX_REQUESTS_PER_SECOND,
            follow_redirects: true,
        }
    }
}

/// Rate-limited HTTP client used as the page fetcher
pub struct HttpClient {
    client: Client,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("Invalid user agent")?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml;q=0.9,*/*;q=0.8"),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .cookie_store(true)
            .gzip(true)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(10)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .context("Failed to create HTTP client")?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.max_requests_per_second)
                .context("Rate limit must be greater than 0")?,
        );
        let rate_limiter = RateLimiter::direct(quota);

        info!(
            "HTTP client ready (timeout {}s, {} req/s)",
            config.timeout_seconds, config.max_requests_per_second
        );

        Ok(Self {
            client,
            rate_limiter,
            config,
        })
    }

    pub fn from_settings(settings: &HttpSettings) -> Result<Self> {
        Self::new(HttpClientConfig::from_settings(settings))
    }

    /// Fetch URL and return the body text
    pub async fn get_text(&self, url: &str) -> PriceWatchResult<String> {
        self.rate_limiter.until_ready().await;

        info!("🌐 HTTP GET: {}", url);
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Network error for {}: {}", url, e);
            PriceWatchError::network(url, e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("❌ HTTP error {}: {}", status, url);
            return Err(PriceWatchError::http_status(url, status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| PriceWatchError::network(url, format!("failed to read response body: {e}")))?;

        debug!("Successfully fetched: {} ({} chars)", url, text.len());
        Ok(text)
    }

    /// Get the configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch(&self, url: &str) -> PriceWatchResult<String> {
        self.get_text(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_http_client_creation() {
        let client = HttpClient::new(HttpClientConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_zero_rate_limit_rejected() {
        let config = HttpClientConfig {
            max_requests_per_second: 0,
            ..Default::default()
        };
        assert!(HttpClient::new(config).is_err());
    }

    #[tokio::test]
    async fn test_config_from_settings() {
        let settings = HttpSettings {
            user_agent: "price-watch-test/1.0".to_string(),
            timeout_seconds: 5,
            max_requests_per_second: 1,
            follow_redirects: false,
        };
        let client = HttpClient::from_settings(&settings).unwrap();
        assert_eq!(client.config().user_agent, "price-watch-test/1.0");
        assert_eq!(client.config().max_requests_per_second, 1);
        assert!(!client.config().follow_redirects);
    }

    #[tokio::test]
    async fn test_invalid_url_is_fetch_error() {
        let client = HttpClient::new(HttpClientConfig::default()).unwrap();
        match client.fetch("not a url").await {
            Err(PriceWatchError::Fetch { url, status, .. }) => {
                assert_eq!(url, "not a url");
                assert_eq!(status, None);
            }
            other => panic!("expected fetch error, got {other:?}"),
        }
    }
}
