//! Structured logging subscriber.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured level.
pub const LOG_ENV: &str = "RUST_LOG";

/// Errors from logging setup.
#[derive(Debug, thiserror::Error)]
pub enum ObservabilityError {
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("Failed to install log subscriber: {0}")]
    Init(String),
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "TRACE"),
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = ObservabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(ObservabilityError::InvalidLevel(other.to_string())),
        }
    }
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (for production/log aggregation).
    Json,
    /// Human-readable format (for development).
    #[default]
    Human,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Minimum level for `stride*` crates and everything else.
    pub level: LogLevel,
    /// Output format.
    pub format: LogFormat,
    /// Extra filter directives, e.g. `reqwest=debug`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directives: Option<String>,
}

impl LogConfig {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Filter built from the configured level and directives.
    pub fn filter(&self) -> Result<EnvFilter, ObservabilityError> {
        let mut spec = self.level.as_str().to_string();
        if let Some(extra) = self.directives.as_deref().filter(|d| !d.trim().is_empty()) {
            spec.push(',');
            spec.push_str(extra.trim());
        }
        EnvFilter::try_new(&spec).map_err(|e| ObservabilityError::InvalidFilter(e.to_string()))
    }
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG`, when set, replaces the configured filter. Fails if a global
/// subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<(), ObservabilityError> {
    let filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => config.filter()?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match config.format {
        LogFormat::Json => builder.json().with_current_span(true).try_init(),
        LogFormat::Human => builder.compact().try_init(),
    };

    result.map_err(|e| ObservabilityError::Init(e.to_string()))
}
