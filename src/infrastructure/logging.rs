//! Logging system configuration and initialization
//!
//! - Console output on stderr, so command output on stdout stays clean
//! - Optional file output through a non-blocking appender
//! - Optional structured JSON format
//! - `RUST_LOG` overrides the configured level

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use once_cell::sync::OnceCell;
use std::path::PathBuf;
use tracing::info;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    filter::LevelFilter,
    fmt::{self, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub use crate::infrastructure::config::LoggingConfig;
use crate::infrastructure::config::defaults;

// Keeps the file writer alive for the lifetime of the process
static LOG_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Local-time timestamps with millisecond precision
struct LocalTimeFormatter;

impl FormatTime for LocalTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Directory for log files when none is configured
pub fn get_log_directory(config: &LoggingConfig) -> PathBuf {
    config.log_dir.clone().unwrap_or_else(|| {
        dirs::data_local_dir()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_default())
            .join(defaults::APP_DIR_NAME)
            .join("logs")
    })
}

/// Filter for the configured level with verbose dependencies capped
///
/// Dependency targets stay at `warn` unless the level asks for `trace`. A bare
/// word must be a level name; per-target filters use `target=level`.
pub fn build_env_filter(level: &str) -> Result<EnvFilter> {
    if !level.contains(['=', ',']) {
        level
            .trim()
            .parse::<LevelFilter>()
            .map_err(|_| anyhow!("Unknown log level '{}'", level))?;
    }
    let mut filter = EnvFilter::try_new(level).with_context(|| format!("Invalid log filter '{level}'"))?;

    if !level.to_lowercase().contains("trace") {
        for directive in ["reqwest=warn", "hyper=warn", "hyper_util=warn", "lettre=warn", "html5ever=warn", "selectors=warn"] {
            if let Ok(directive) = directive.parse() {
                filter = filter.add_directive(directive);
            }
        }
    }

    Ok(filter)
}

/// Initialize the logging system with default configuration
pub fn init_logging() -> Result<()> {
    init_logging_with_config(&LoggingConfig::default())
}

/// Initialize logging with custom configuration
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_env_filter(&config.level)?,
    };

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if config.console_output {
        let console_layer = fmt::Layer::new()
            .with_writer(std::io::stderr)
            .with_timer(LocalTimeFormatter)
            .with_target(false);
        if config.json_format {
            layers.push(console_layer.json().boxed());
        } else {
            layers.push(console_layer.boxed());
        }
    }

    let mut log_dir = None;
    if config.file_output {
        let dir = get_log_directory(config);
        std::fs::create_dir_all(&dir)
            .map_err(|e| anyhow!("Failed to create log directory {:?}: {}", dir, e))?;

        let (file_writer, guard) = non_blocking(rolling::never(&dir, &config.file_name));
        // A second initialisation would fail below anyway; keep the first guard.
        let _ = LOG_GUARD.set(guard);

        let file_layer = fmt::Layer::new()
            .with_writer(file_writer)
            .with_timer(LocalTimeFormatter)
            .with_ansi(false);
        if config.json_format {
            layers.push(file_layer.json().with_target(true).with_line_number(true).boxed());
        } else {
            layers.push(file_layer.with_target(false).boxed());
        }
        log_dir = Some(dir);
    }

    if layers.is_empty() {
        return Err(anyhow!("No logging output configured"));
    }

    Registry::default()
        .with(layers)
        .with(env_filter)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))?;

    info!("Logging system initialized (level: {}, json: {})", config.level, config.json_format);
    if let Some(dir) = log_dir {
        info!("Log directory: {:?}", dir);
    }

    Ok(())
}
