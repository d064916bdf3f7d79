//! Observability (structured logging)
//!
//! Installs a `tracing` subscriber: pretty output for debug builds, JSON for
//! release builds, with `RUST_LOG` overriding the default filter.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{GenerationError, Result};

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line output
    Pretty,
    /// Single-line human-readable output
    Compact,
    /// One JSON object per event
    Json,
}

impl Default for LogFormat {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Filter used when `RUST_LOG` is not set
    pub default_filter: String,

    /// Output format
    pub format: LogFormat,

    /// Write events to stderr instead of stdout
    pub stderr: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            default_filter: if cfg!(debug_assertions) {
                "info,crudgen=debug".to_string()
            } else {
                "info".to_string()
            },
            format: LogFormat::default(),
            stderr: false,
        }
    }
}

impl ObservabilityConfig {
    /// Create a config with a default filter directive
    pub fn new(default_filter: impl Into<String>) -> Self {
        Self {
            default_filter: default_filter.into(),
            ..Default::default()
        }
    }

    /// Choose the output format
    #[must_use]
    pub const fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Log to stderr, keeping stdout free for generated output
    #[must_use]
    pub const fn with_stderr(mut self) -> Self {
        self.stderr = true;
        self
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_filter))
    }
}

/// Initialize logging with the default configuration
///
/// # Errors
///
/// Returns [`GenerationError::Config`] if a global subscriber is already set.
///
/// # Example
///
/// ```rust,no_run
/// # fn main() -> crudgen::Result<()> {
/// crudgen::observability::init()?;
/// tracing::info!("generator started");
/// # Ok(())
/// # }
/// ```
pub fn init() -> Result<()> {
    init_with(&ObservabilityConfig::default())
}

/// Initialize logging with an explicit configuration
///
/// # Errors
///
/// Returns [`GenerationError::Config`] if a global subscriber is already set.
pub fn init_with(config: &ObservabilityConfig) -> Result<()> {
    let registry = tracing_subscriber::registry().with(config.env_filter());
    let layer = tracing_subscriber::fmt::layer();

    let result = match (config.format, config.stderr) {
        (LogFormat::Pretty, false) => registry.with(layer.pretty()).try_init(),
        (LogFormat::Pretty, true) => registry.with(layer.pretty().with_writer(std::io::stderr)).try_init(),
        (LogFormat::Compact, false) => registry.with(layer.compact()).try_init(),
        (LogFormat::Compact, true) => registry.with(layer.compact().with_writer(std::io::stderr)).try_init(),
        (LogFormat::Json, false) => registry.with(layer.json()).try_init(),
        (LogFormat::Json, true) => registry.with(layer.json().with_writer(std::io::stderr)).try_init(),
    };

    result.map_err(|err| GenerationError::Config(format!("logging already initialized: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ObservabilityConfig::default();
        assert!(config.default_filter.starts_with("info"));
        assert!(!config.stderr);
    }

    #[test]
    fn test_builder() {
        let config = ObservabilityConfig::new("warn")
            .with_format(LogFormat::Compact)
            .with_stderr();

        assert_eq!(config.default_filter, "warn");
        assert_eq!(config.format, LogFormat::Compact);
        assert!(config.stderr);
    }

    #[test]
    fn test_second_init_fails() {
        let config = ObservabilityConfig::new("off").with_format(LogFormat::Compact);
        // The first call may race with other tests; the second must fail
        let _ = init_with(&config);
        assert!(init_with(&config).is_err());
    }
}
