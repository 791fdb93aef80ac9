//! Application layer
//!
//! Orchestrates the domain rules over the collaborator traits: the scraping
//! pipeline, cross-source comparison, the product dashboard and text reports.

pub mod comparator;
pub mod dashboard;
pub mod report;
pub mod scraper;

pub use comparator::{AlertStatus, ComparisonReport, PriceComparator};
pub use dashboard::Dashboard;
pub use report::{DEFAULT_CHART_HEIGHT, alert_message, render_record, render_summary, render_trend_chart};
pub use scraper::ProductScraper;
