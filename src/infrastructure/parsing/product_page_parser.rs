//! Product page parser
//!
//! Extracts name, price text, description and availability from a product
//! page using per-field selector lists with fallbacks.

use anyhow::Result;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use super::config::ProductPageSelectors;
use crate::domain::{PriceWatchError, PriceWatchResult, ProductExtractor, ProductRecord, clean_description};

/// Compiled selectors for one page field, keeping the source strings for diagnostics
struct FieldSelectors {
    field: &'static str,
    sources: Vec<String>,
    compiled: Vec<Selector>,
}

/// Parser for extracting product information from product pages
pub struct ProductPageParser {
    name: FieldSelectors,
    price: FieldSelectors,
    description: FieldSelectors,
    availability: FieldSelectors,
}

impl ProductPageParser {
    /// Create a new product page parser with default selectors
    pub fn new() -> Result<Self> {
        Self::with_config(&ProductPageSelectors::default())
    }

    /// Create parser with custom selector configuration
    pub fn with_config(selectors: &ProductPageSelectors) -> Result<Self> {
        Ok(Self {
            name: Self::compile_selectors("name", &selectors.name)?,
            price: Self::compile_selectors("price", &selectors.price)?,
            description: Self::compile_selectors("description", &selectors.description)?,
            availability: Self::compile_selectors("availability", &selectors.availability)?,
        })
    }

    /// Compile selector strings, skipping invalid ones as long as one survives
    fn compile_selectors(field: &'static str, selector_strings: &[String]) -> Result<FieldSelectors> {
        let mut sources = Vec::new();
        let mut compiled = Vec::new();
        let mut errors = Vec::new();

        for selector_str in selector_strings {
            match Selector::parse(selector_str) {
                Ok(selector) => {
                    sources.push(selector_str.clone());
                    compiled.push(selector);
                }
                Err(e) => {
                    warn!("Failed to compile {} selector '{}': {}", field, selector_str, e);
                    errors.push(format!("'{selector_str}': {e}"));
                }
            }
        }

        if compiled.is_empty() {
            return Err(anyhow::anyhow!(
                "No valid {} selectors compiled from {} attempts. Errors: {}",
                field,
                selector_strings.len(),
                errors.join(", ")
            ));
        }

        Ok(FieldSelectors {
            field,
            sources,
            compiled,
        })
    }

    /// Text of the first non-empty element matched by any selector, in order
    fn extract_field(&self, html: &Html, selectors: &FieldSelectors, url: &str) -> PriceWatchResult<String> {
        for (i, selector) in selectors.compiled.iter().enumerate() {
            for element in html.select(selector) {
                let text = element.text().collect::<String>().trim().to_string();
                if !text.is_empty() {
                    debug!("Extracted {} using selector {}: {}", selectors.field, i, text);
                    return Ok(text);
                }
            }
        }

        debug!("Failed to extract {} using {} selectors", selectors.field, selectors.compiled.len());
        Err(PriceWatchError::extraction(selectors.field, url, selectors.sources.clone()))
    }
}

impl ProductExtractor for ProductPageParser {
    fn extract(&self, html: &str, url: &str) -> PriceWatchResult<ProductRecord> {
        let document = Html::parse_document(html);

        let record = ProductRecord {
            url: url.to_string(),
            name: self.extract_field(&document, &self.name, url)?,
            price_text: self.extract_field(&document, &self.price, url)?,
            description: clean_description(&self.extract_field(&document, &self.description, url)?),
            availability: self.extract_field(&document, &self.availability, url)?,
        };

        debug!("Extracted product '{}' priced '{}' from {}", record.name, record.price_text, url);
        Ok(record)
    }
}
