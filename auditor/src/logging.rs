//! Structured Logging Module
//!
//! Sets up the `tracing` subscriber for the auditor. Output can be pretty,
//! compact, or JSON for log aggregation; `RUST_LOG` always wins over the
//! configured level.

use crate::config::LoggingConfig;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    }
}

/// Unknown level names fall back to `info`
fn parse_level(s: &str) -> LevelFilter {
    s.parse().unwrap_or(LevelFilter::INFO)
}

/// Resolved logging settings
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LevelFilter,
    pub format: LogFormat,
    pub ansi_colors: bool,
    /// Per-target overrides appended to the filter
    pub targets: Vec<(String, LevelFilter)>,
}

impl LogConfig {
    /// Build from the `[logging]` section, then apply LOG_FORMAT and LOG_ANSI
    pub fn from_config(config: &LoggingConfig) -> Self {
        let mut resolved = Self {
            level: parse_level(&config.level),
            format: LogFormat::parse(&config.format),
            ansi_colors: config.ansi_colors,
            targets: config
                .targets
                .iter()
                .map(|(target, level)| (target.clone(), parse_level(level)))
                .collect(),
        };

        if let Ok(format) = std::env::var("LOG_FORMAT") {
            resolved.format = LogFormat::parse(&format);
        }
        if let Ok(ansi) = std::env::var("LOG_ANSI") {
            resolved.ansi_colors = ansi.eq_ignore_ascii_case("true");
        }

        resolved
    }

    fn directives(&self) -> String {
        std::iter::once(self.level.to_string())
            .chain(
                self.targets
                    .iter()
                    .map(|(target, level)| format!("{}={}", target, level)),
            )
            .collect::<Vec<_>>()
            .join(",")
            .to_lowercase()
    }
}

/// Initialize the logging system with the given configuration
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(rust_log) => EnvFilter::new(rust_log),
        Err(_) => EnvFilter::new(config.directives()),
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_ansi(false))
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty().with_ansi(config.ansi_colors))
            .try_init(),
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact().with_ansi(config.ansi_colors))
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to init logging: {}", e))
}
