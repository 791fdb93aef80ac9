//! Domain module - Core pricing rules and entities
//!
//! Pure types and rules with no I/O: price cleaning, statistics, spread
//! classification, history tracking and the collaborator traits the
//! application layer depends on.

pub mod analyzer;
pub mod cleaner;
pub mod errors;
pub mod history;
pub mod pricing;
pub mod product;
pub mod services;

// Re-export commonly used items for convenience
pub use analyzer::{DEFAULT_ALERT_SUBJECT, DEFAULT_GAP_THRESHOLD, PricingAnalyzer};
pub use cleaner::{clean_description, clean_price, format_price};
pub use errors::{PriceWatchError, PriceWatchResult};
pub use history::HistoryStore;
pub use pricing::{Price, PricingStrategy, PricingSummary};
pub use product::{PricedRecord, ProductRecord, ProductTarget};
pub use services::{Notifier, PageFetcher, ProductExtractor};
