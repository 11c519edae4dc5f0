//! Backend configuration
//!
//! `LoggerConfig` is the serde-friendly description of a `Logger`: minimum
//! level, line format, timestamp style and where lines go. It can be embedded
//! in an application's own config file or read from the environment.

use super::{
    error::{LoggerError, Result},
    log_level::LogLevel,
    logger::Logger,
    output_format::OutputFormat,
    timestamp::TimestampFormat,
};
use crate::appenders::{ConsoleAppender, ConsoleTarget, FileAppender};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the minimum level
pub const LEVEL_ENV: &str = "LOG_LEVEL";
/// Environment variable holding the output format
pub const FORMAT_ENV: &str = "LOG_FORMAT";

/// Where a configured backend writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputTarget {
    Console(ConsoleTarget),
    File { file: PathBuf },
}

impl Default for OutputTarget {
    fn default() -> Self {
        OutputTarget::Console(ConsoleTarget::Stderr)
    }
}

/// # Example
///
/// ```
/// use rust_context_logger::core::{LoggerConfig, OutputFormat};
/// use rust_context_logger::LogLevel;
///
/// let config: LoggerConfig =
///     serde_json::from_str(r#"{"level":"debug","format":"text"}"#).unwrap();
/// assert_eq!(config.level, LogLevel::Debug);
/// assert_eq!(config.format, OutputFormat::Text);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub format: OutputFormat,
    pub timestamp: TimestampFormat,
    pub target: OutputTarget,
}

impl LoggerConfig {
    /// Defaults overridden by `LOG_LEVEL` / `LOG_FORMAT` when set
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(level) = lookup(LEVEL_ENV) {
            config.level = level
                .trim()
                .parse()
                .map_err(|e: String| LoggerError::config(LEVEL_ENV, e))?;
        }

        if let Some(format) = lookup(FORMAT_ENV) {
            config.format = format
                .trim()
                .parse()
                .map_err(|e: String| LoggerError::config(FORMAT_ENV, e))?;
        }

        Ok(config)
    }
}

impl Logger {
    /// Build a backend from configuration
    ///
    /// Fails when the timestamp pattern is invalid or a file target cannot be
    /// opened.
    pub fn from_config(config: &LoggerConfig) -> Result<Logger> {
        config.timestamp.validate()?;

        let builder = Logger::builder()
            .min_level(config.level)
            .output_format(config.format)
            .timestamp_format(config.timestamp.clone());

        let builder = match &config.target {
            OutputTarget::Console(target) => {
                builder.boxed_appender(Box::new(ConsoleAppender::with_target(*target)))
            }
            OutputTarget::File { file } => {
                builder.boxed_appender(Box::new(FileAppender::new(file.clone())?))
            }
        };

        Ok(builder.build())
    }
}
