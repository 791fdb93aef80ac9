//! HTML parsing infrastructure for product pages
//!
//! Selector configuration and the `scraper`-based extractor that turns a
//! fetched page into a [`ProductRecord`](crate::domain::ProductRecord).

pub mod config;
pub mod product_page_parser;

// Re-export public types
pub use config::ProductPageSelectors;
pub use product_page_parser::ProductPageParser;
