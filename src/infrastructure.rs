//! Infrastructure layer for HTTP fetching, parsing, alert delivery and settings
//!
//! Adapters implementing the domain collaborator traits, plus configuration
//! loading and logging setup.

pub mod config; // Layered application configuration
pub mod http_client;
pub mod logging; // Logging infrastructure
pub mod notifier;
pub mod parsing; // Product page extraction

// Re-export commonly used items
pub use config::{AppConfig, ConfigError, NotificationChannel};
pub use http_client::{HttpClient, HttpClientConfig};
pub use logging::{init_logging, init_logging_with_config};
pub use notifier::{LogNotifier, SmtpNotifier, notifier_from_config};
pub use parsing::{ProductPageParser, ProductPageSelectors};
