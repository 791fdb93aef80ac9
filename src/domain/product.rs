use serde::{Deserialize, Serialize};

use super::pricing::Price;

/// Product fields extracted from one product page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub url: String,
    pub name: String,
    pub price_text: String,
    pub description: String,
    pub availability: String,
}

/// A product record together with its cleaned price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedRecord {
    pub record: ProductRecord,
    pub price: Price,
}

/// A product tracked across several shops
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTarget {
    pub name: String,
    #[serde(default)]
    pub urls: Vec<String>,
}

impl ProductTarget {
    pub fn new(name: &str, urls: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            urls,
        }
    }
}
