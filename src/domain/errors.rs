//! Error types shared by every price-watch operation
//!
//! Each variant maps to one failure kind of the pipeline: cleaning price text,
//! aggregating statistics, fetching pages, extracting fields, reading history
//! and delivering alerts.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriceWatchError {
    #[error("Malformed price text '{text}': {reason}")]
    Parse { text: String, reason: String },

    #[error("Cannot compute pricing statistics over an empty price sequence")]
    EmptyInput,

    #[error("Failed to fetch {url}: {reason}")]
    Fetch {
        url: String,
        status: Option<u16>,
        reason: String,
    },

    #[error("Required element '{field}' not found on {url}")]
    Extraction {
        field: String,
        url: String,
        tried_selectors: Vec<String>,
    },

    #[error("No price history recorded for product '{product}'")]
    UnknownProduct { product: String },

    #[error("Notification failed: {reason}")]
    Notification { reason: String },
}

impl PriceWatchError {
    /// Create a parse error for the given raw price text
    pub fn parse(text: &str, reason: &str) -> Self {
        Self::Parse {
            text: text.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a fetch error from a transport failure (no HTTP status available)
    pub fn network(url: &str, reason: impl ToString) -> Self {
        Self::Fetch {
            url: url.to_string(),
            status: None,
            reason: reason.to_string(),
        }
    }

    /// Create a fetch error from a non-success HTTP status
    pub fn http_status(url: &str, status: u16) -> Self {
        Self::Fetch {
            url: url.to_string(),
            status: Some(status),
            reason: format!("HTTP status {status}"),
        }
    }

    /// Create an extraction error listing the selectors that were attempted
    pub fn extraction(field: &str, url: &str, tried_selectors: Vec<String>) -> Self {
        Self::Extraction {
            field: field.to_string(),
            url: url.to_string(),
            tried_selectors,
        }
    }

    pub fn unknown_product(product: &str) -> Self {
        Self::UnknownProduct {
            product: product.to_string(),
        }
    }

    pub fn notification(reason: impl ToString) -> Self {
        Self::Notification {
            reason: reason.to_string(),
        }
    }

    /// The URL this error is attributed to, if any
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Fetch { url, .. } | Self::Extraction { url, .. } => Some(url),
            _ => None,
        }
    }
}

pub type PriceWatchResult<T> = Result<T, PriceWatchError>;
