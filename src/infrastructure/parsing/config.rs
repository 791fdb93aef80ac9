//! Parsing configuration for product pages
//!
//! Centralized CSS selectors, one list per field. The first selector of each
//! list is the markup contract shops are expected to follow; the remaining
//! entries are looser fallbacks tried in order.

use serde::{Deserialize, Serialize};

/// CSS selectors for product detail pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductPageSelectors {
    pub name: Vec<String>,
    pub price: Vec<String>,
    pub description: Vec<String>,
    pub availability: Vec<String>,
}

impl Default for ProductPageSelectors {
    fn default() -> Self {
        Self {
            name: vec![
                "h1.product-name".to_string(),
                ".product-name".to_string(),
                ".product-title".to_string(),
                "h1".to_string(),
            ],
            price: vec![
                "span.price".to_string(),
                ".price".to_string(),
                "[itemprop='price']".to_string(),
            ],
            description: vec![
                "div.description".to_string(),
                ".description".to_string(),
                ".product-description".to_string(),
            ],
            availability: vec![
                "span.availability".to_string(),
                ".availability".to_string(),
                ".stock-status".to_string(),
            ],
        }
    }
}
