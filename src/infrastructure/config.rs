//! Configuration infrastructure
//!
//! Settings are layered with the `config` crate:
//! 1. Built-in defaults (see [`defaults`])
//! 2. Optional configuration file (TOML, JSON or YAML)
//! 3. Environment variables prefixed with `PRICE_WATCH`, using `__` as the
//!    section separator (e.g. `PRICE_WATCH_ALERT__SMTP_HOST`)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::domain::ProductTarget;
use crate::infrastructure::parsing::ProductPageSelectors;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {source}")]
    Load {
        #[from]
        source: config::ConfigError,
    },

    #[error("Configuration validation failed: {message}")]
    Validation { message: String },
}

impl ConfigError {
    fn invalid(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub http: HttpSettings,
    pub alert: AlertConfig,
    pub selectors: ProductPageSelectors,
    pub logging: LoggingConfig,
    pub products: Vec<ProductTarget>,
}

/// HTTP fetching behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_requests_per_second: u32,
    pub follow_redirects: bool,
}

/// Where price-spread alerts go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationChannel {
    Log,
    Smtp,
}

/// Alerting threshold and delivery settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Spread (max - min) at or above which an alert fires
    pub alert_threshold: f64,
    pub channel: NotificationChannel,
    pub subject: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub sender: String,
    pub recipient: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub smtp_timeout_seconds: u64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    /// Enable console (stderr) output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for log files; defaults to the platform data directory
    pub log_dir: Option<PathBuf>,

    pub file_name: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            user_agent: defaults::USER_AGENT.to_string(),
            timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            max_requests_per_second: defaults::MAX_REQUESTS_PER_SECOND,
            follow_redirects: true,
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            alert_threshold: defaults::ALERT_THRESHOLD,
            channel: NotificationChannel::Log,
            subject: defaults::ALERT_SUBJECT.to_string(),
            smtp_host: String::new(),
            smtp_port: defaults::SMTP_PORT,
            sender: String::new(),
            recipient: String::new(),
            username: None,
            password: None,
            smtp_timeout_seconds: defaults::SMTP_TIMEOUT_SECONDS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: false,
            console_output: true,
            file_output: false,
            log_dir: None,
            file_name: defaults::LOG_FILE_NAME.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an explicit file (which must exist) plus environment
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::from_layers(Some(config::File::from(path)), Self::environment())?;
        info!("Loaded configuration from: {:?}", path);
        Ok(config)
    }

    /// Load from the default file location if present, then environment
    pub fn load_default() -> Result<Self, ConfigError> {
        let file = Self::default_config_path()
            .map(|path| config::File::with_name(&path.to_string_lossy()).required(false));
        Self::from_layers(file, Self::environment())
    }

    /// Defaults, then the optional file, then `environment` on top
    fn from_layers(
        file: Option<config::File<config::FileSourceFile, config::FileFormat>>,
        environment: config::Environment,
    ) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(file);
        }

        let config: Self = builder.add_source(environment).build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Default configuration file stem: `<config_dir>/price-watch/price-watch`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(defaults::APP_DIR_NAME).join("price-watch"))
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(defaults::ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let alert = &self.alert;
        if !alert.alert_threshold.is_finite() || alert.alert_threshold < 0.0 {
            return Err(ConfigError::invalid(
                "alert.alert_threshold must be a finite, non-negative number",
            ));
        }

        if self.http.max_requests_per_second == 0 {
            return Err(ConfigError::invalid(
                "http.max_requests_per_second must be greater than 0",
            ));
        }

        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::invalid("http.timeout_seconds must be greater than 0"));
        }

        if alert.channel == NotificationChannel::Smtp {
            for (field, value) in [
                ("smtp_host", &alert.smtp_host),
                ("sender", &alert.sender),
                ("recipient", &alert.recipient),
            ] {
                if value.trim().is_empty() {
                    return Err(ConfigError::invalid(format!(
                        "alert.{field} is required when alert.channel = \"smtp\""
                    )));
                }
            }
        }

        for product in &self.products {
            if product.name.trim().is_empty() {
                return Err(ConfigError::invalid("products[].name must not be empty"));
            }
            for url in &product.urls {
                url::Url::parse(url).map_err(|e| {
                    ConfigError::invalid(format!("invalid URL '{url}' for '{}': {e}", product.name))
                })?;
            }
        }

        Ok(())
    }

    /// Catalog entry for `name`, if configured
    pub fn product(&self, name: &str) -> Option<&ProductTarget> {
        self.products.iter().find(|p| p.name == name)
    }
}

/// Default configuration values
pub mod defaults {
    /// Browser-like user agent; many shops reject obvious bots
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

    /// Default request timeout in seconds
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;

    /// Default politeness limit for page fetches
    pub const MAX_REQUESTS_PER_SECOND: u32 = 2;

    /// Default spread threshold for alerts and strategy labels
    pub const ALERT_THRESHOLD: f64 = crate::domain::DEFAULT_GAP_THRESHOLD;

    pub const ALERT_SUBJECT: &str = crate::domain::DEFAULT_ALERT_SUBJECT;

    /// STARTTLS submission port
    pub const SMTP_PORT: u16 = 587;

    pub const SMTP_TIMEOUT_SECONDS: u64 = 30;

    pub const LOG_LEVEL: &str = "info";

    pub const LOG_FILE_NAME: &str = "price-watch.log";

    pub const APP_DIR_NAME: &str = "price-watch";

    pub const ENV_PREFIX: &str = "PRICE_WATCH";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.alert.alert_threshold, 10.0);
        assert_eq!(config.alert.channel, NotificationChannel::Log);
        assert_eq!(config.alert.smtp_port, 587);
    }

    #[test]
    fn test_smtp_channel_requires_host_and_addresses() {
        let mut config = AppConfig::default();
        config.alert.channel = NotificationChannel::Smtp;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("smtp_host"));

        config.alert.smtp_host = "smtp.example.com".to_string();
        config.alert.sender = "alerts@example.com".to_string();
        config.alert.recipient = "buyer@example.com".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let mut config = AppConfig::default();
        config.alert.alert_threshold = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn test_zero_rate_limit_rejected() {
        let mut config = AppConfig::default();
        config.http.max_requests_per_second = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_product_url_rejected() {
        let mut config = AppConfig::default();
        config.products.push(ProductTarget::new("Kettle", vec!["not a url".to_string()]));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Kettle"));
    }

    #[test]
    fn test_load_partial_toml_file_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[alert]
alert_threshold = 4.5

[[products]]
name = "Kettle"
urls = ["https://shop-a.example/kettle", "https://shop-b.example/kettle"]
"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.alert.alert_threshold, 4.5);
        assert_eq!(config.alert.subject, defaults::ALERT_SUBJECT);
        assert_eq!(config.http.timeout_seconds, defaults::REQUEST_TIMEOUT_SECONDS);
        let kettle = config.product("Kettle").unwrap();
        assert_eq!(kettle.urls.len(), 2);
        assert!(config.product("Toaster").is_none());
    }

    fn environment_with(vars: &[(&str, &str)]) -> config::Environment {
        let map = vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        AppConfig::environment().source(Some(map))
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let env = environment_with(&[
            ("PRICE_WATCH_ALERT__ALERT_THRESHOLD", "4.5"),
            ("PRICE_WATCH_ALERT__CHANNEL", "smtp"),
            ("PRICE_WATCH_ALERT__SMTP_HOST", "smtp.example.com"),
            ("PRICE_WATCH_ALERT__SENDER", "alerts@example.com"),
            ("PRICE_WATCH_ALERT__RECIPIENT", "buyer@example.com"),
            ("PRICE_WATCH_HTTP__TIMEOUT_SECONDS", "12"),
        ]);

        let config = AppConfig::from_layers(None, env).unwrap();
        assert_eq!(config.alert.alert_threshold, 4.5);
        assert_eq!(config.alert.channel, NotificationChannel::Smtp);
        assert_eq!(config.alert.smtp_host, "smtp.example.com");
        assert_eq!(config.http.timeout_seconds, 12);
        assert_eq!(config.alert.subject, defaults::ALERT_SUBJECT);
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[alert]\nalert_threshold = 25.0\nsubject = \"From file\"").unwrap();

        let env = environment_with(&[("PRICE_WATCH_ALERT__ALERT_THRESHOLD", "4.5")]);
        let config = AppConfig::from_layers(Some(config::File::from(file.path())), env).unwrap();

        assert_eq!(config.alert.alert_threshold, 4.5);
        assert_eq!(config.alert.subject, "From file");
        assert_eq!(config.alert.channel, NotificationChannel::Log);
    }

    #[test]
    fn test_unprefixed_variables_are_ignored() {
        let env = environment_with(&[("ALERT__ALERT_THRESHOLD", "4.5")]);
        let config = AppConfig::from_layers(None, env).unwrap();
        assert_eq!(config.alert.alert_threshold, defaults::ALERT_THRESHOLD);
    }

    #[test]
    fn test_invalid_environment_value_fails_validation() {
        let env = environment_with(&[("PRICE_WATCH_HTTP__MAX_REQUESTS_PER_SECOND", "0")]);
        assert!(matches!(
            AppConfig::from_layers(None, env),
            Err(ConfigError::Validation { .. })
        ));
    }
}
