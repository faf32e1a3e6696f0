//! Logger configuration
//!
//! - `LoggerOptions`: caller-supplied overrides, every field optional
//! - `LoggerConfig`: the effective configuration, every field set
//! - `LoggerSettings`: the serializable subset, loadable from JSON
//!
//! The effective configuration is the defaults with the options overlaid
//! field by field. Nothing is merged below the top level: options that set
//! `base` replace the default base metadata wholesale.
//!
//! `timestamp_format` and `output_format` are kept as data and turned into
//! functions during the overlay, so a built-in format always reads the
//! final message key regardless of setter order.

use super::error::{LoggerError, Result};
use super::formatter::{json_content, label_level, ContentFormatter, LevelFormatter, OutputFormat};
use super::log_level::{LogLevel, Severity};
use super::record::{Metadata, DEFAULT_MESSAGE_KEY};
use super::timestamp::{default_timestamp, TimestampFn, TimestampFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Caller-supplied configuration overrides
///
/// # Example
///
/// ```
/// use scoped_logger::{LoggerOptions, OutputFormat};
///
/// let options = LoggerOptions::new()
///     .min_level("debug")
///     .message_key("message")
///     .output_format(OutputFormat::Logfmt);
/// ```
#[derive(Clone, Default)]
pub struct LoggerOptions {
    pub min_level: Option<Severity>,
    pub message_key: Option<String>,
    pub base: Option<Metadata>,
    pub timestamp: Option<TimestampFn>,
    pub format_content: Option<ContentFormatter>,
    pub format_level: Option<LevelFormatter>,
    /// Built-in clock, used when `timestamp` is unset
    pub timestamp_format: Option<TimestampFormat>,
    /// Built-in content format, used when `format_content` is unset
    pub output_format: Option<OutputFormat>,
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: impl Into<Severity>) -> Self {
        self.min_level = Some(level.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn message_key(mut self, key: impl Into<String>) -> Self {
        self.message_key = Some(key.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn base(mut self, base: Metadata) -> Self {
        self.base = Some(base);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp(mut self, clock: TimestampFn) -> Self {
        self.timestamp = Some(clock);
        self.timestamp_format = None;
        self
    }

    /// Use one of the built-in timestamp formats as the clock
    ///
    /// Replaces a clock set with [`timestamp`](Self::timestamp). A `Custom`
    /// strftime string is checked when the configuration is built.
    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = Some(format);
        self.timestamp = None;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format_content(mut self, formatter: ContentFormatter) -> Self {
        self.format_content = Some(formatter);
        self.output_format = None;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format_level(mut self, formatter: LevelFormatter) -> Self {
        self.format_level = Some(formatter);
        self
    }

    /// Use one of the built-in output formats as the content formatter
    ///
    /// Replaces a formatter set with [`format_content`](Self::format_content).
    /// The message is read from the effective message key.
    #[must_use = "builder methods return a new value"]
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self.format_content = None;
        self
    }
}

impl fmt::Debug for LoggerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerOptions")
            .field("min_level", &self.min_level)
            .field("message_key", &self.message_key)
            .field("base", &self.base)
            .field("timestamp", &self.timestamp.as_ref().map(|_| "<fn>"))
            .field("format_content", &self.format_content.as_ref().map(|_| "<fn>"))
            .field("format_level", &self.format_level.as_ref().map(|_| "<fn>"))
            .field("timestamp_format", &self.timestamp_format)
            .field("output_format", &self.output_format)
            .finish()
    }
}

/// Effective logger configuration
///
/// Immutable once a logger is built from it.
#[derive(Clone)]
pub struct LoggerConfig {
    min_level: LogLevel,
    message_key: String,
    base: Metadata,
    timestamp: TimestampFn,
    format_content: ContentFormatter,
    format_level: LevelFormatter,
}

impl LoggerConfig {
    /// Overlay `options` onto this configuration
    ///
    /// Fields set in `options` win. An unknown minimum severity is rejected
    /// with [`LoggerError::InvalidSeverity`], an invalid `Custom` timestamp
    /// format with [`LoggerError::InvalidConfiguration`].
    pub fn overlay(&self, options: LoggerOptions) -> Result<Self> {
        let min_level = match options.min_level {
            Some(severity) => severity.resolve()?,
            None => self.min_level,
        };
        let message_key = options
            .message_key
            .unwrap_or_else(|| self.message_key.clone());

        let timestamp = match (options.timestamp, options.timestamp_format) {
            (Some(clock), _) => clock,
            (None, Some(format)) => {
                format.validate()?;
                format.clock()
            }
            (None, None) => Arc::clone(&self.timestamp),
        };

        let format_content = match (options.format_content, options.output_format) {
            (Some(formatter), _) => formatter,
            (None, Some(format)) => format.formatter(message_key.clone()),
            (None, None) => Arc::clone(&self.format_content),
        };

        Ok(Self {
            min_level,
            message_key,
            base: options.base.unwrap_or_else(|| self.base.clone()),
            timestamp,
            format_content,
            format_level: options
                .format_level
                .unwrap_or_else(|| Arc::clone(&self.format_level)),
        })
    }

    /// Defaults with `options` overlaid
    pub fn from_options(options: LoggerOptions) -> Result<Self> {
        Self::default().overlay(options)
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    pub fn base(&self) -> &Metadata {
        &self.base
    }

    pub fn timestamp(&self) -> &TimestampFn {
        &self.timestamp
    }

    pub fn format_content(&self) -> &ContentFormatter {
        &self.format_content
    }

    pub fn format_level(&self) -> &LevelFormatter {
        &self.format_level
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            message_key: DEFAULT_MESSAGE_KEY.to_string(),
            base: Metadata::new(),
            timestamp: Arc::new(default_timestamp),
            format_content: Arc::new(json_content),
            format_level: Arc::new(label_level),
        }
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("min_level", &self.min_level)
            .field("message_key", &self.message_key)
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

/// Serializable logger settings
///
/// # Example
///
/// ```
/// use scoped_logger::{LoggerSettings, OutputFormat};
///
/// let settings = LoggerSettings::from_json_str(
///     r#"{"min_level": "warn", "output_format": "logfmt"}"#,
/// ).unwrap();
/// let options = settings.into_options();
/// assert_eq!(options.output_format, Some(OutputFormat::Logfmt));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerSettings {
    pub min_level: Option<Severity>,
    pub message_key: Option<String>,
    pub base: Option<Metadata>,
    pub timestamp_format: Option<TimestampFormat>,
    pub output_format: Option<OutputFormat>,
}

impl LoggerSettings {
    /// Parse settings from JSON and validate the minimum severity and
    /// timestamp format
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: LoggerSettings = serde_json::from_str(json)
            .map_err(|e| LoggerError::config("LoggerSettings", e.to_string()))?;
        if let Some(ref severity) = settings.min_level {
            severity.resolve()?;
        }
        if let Some(ref format) = settings.timestamp_format {
            format
                .validate()
                .map_err(|e| LoggerError::config("LoggerSettings", e.to_string()))?;
        }
        Ok(settings)
    }

    pub fn into_options(self) -> LoggerOptions {
        LoggerOptions {
            min_level: self.min_level,
            message_key: self.message_key,
            base: self.base,
            timestamp_format: self.timestamp_format,
            output_format: self.output_format,
            ..LoggerOptions::default()
        }
    }
}
