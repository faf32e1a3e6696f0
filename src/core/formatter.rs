//! Formatter contract
//!
//! Two pluggable function types shape the output:
//! - a [`LevelFormatter`] turns a level and its canonical label into the
//!   value stored in the record's `severity` field
//! - a [`ContentFormatter`] turns a finished record into the text a sink
//!   writes
//!
//! [`OutputFormat`] provides ready-made content formatters.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::record::{Record, NAMESPACE_KEY, SEVERITY_KEY, TIMESTAMP_KEY};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Renders a finished record as the text written by a sink
pub type ContentFormatter = Arc<dyn Fn(&Record) -> Result<String> + Send + Sync>;

/// Maps `(level, canonical label)` to the displayed severity value
pub type LevelFormatter = Arc<dyn Fn(LogLevel, &'static str) -> Value + Send + Sync>;

/// Default content formatter: the record as a single-line JSON object
pub fn json_content(record: &Record) -> Result<String> {
    record
        .to_json()
        .map_err(|e| LoggerError::formatter("json", e.to_string()))
}

/// Default level formatter: the canonical uppercase label
pub fn label_level(_level: LogLevel, label: &'static str) -> Value {
    Value::String(label.to_string())
}

/// Level formatter that keeps the numeric rank instead of the label
pub fn rank_level(level: LogLevel, _label: &'static str) -> Value {
    Value::from(level.rank())
}

/// Wrap an infallible closure as a content formatter
pub fn content_fn<F>(f: F) -> ContentFormatter
where
    F: Fn(&Record) -> String + Send + Sync + 'static,
{
    Arc::new(move |record: &Record| Ok(f(record)))
}

/// Wrap a fallible closure as a content formatter
pub fn try_content_fn<F>(f: F) -> ContentFormatter
where
    F: Fn(&Record) -> Result<String> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wrap a closure as a level formatter
pub fn level_fn<F, V>(f: F) -> LevelFormatter
where
    F: Fn(LogLevel, &'static str) -> V + Send + Sync + 'static,
    V: Into<Value>,
{
    Arc::new(move |level: LogLevel, label: &'static str| f(level, label).into())
}

/// Built-in output formats
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// One JSON object per line (default)
    ///
    /// Example: `{"severity":"INFO","timestamp":"2025-01-08 10:30:45","namespace":"api","msg":"ready"}`
    #[default]
    Json,

    /// Human-readable text
    ///
    /// Example: `[INFO] [2025-01-08 10:30:45] [api] ready port=8080`
    Text,

    /// Human-readable text with the severity colored by level
    ColoredText,

    /// Logfmt key=value pairs
    ///
    /// Example: `severity=INFO timestamp="2025-01-08 10:30:45" namespace=api msg=ready port=8080`
    Logfmt,
}

impl OutputFormat {
    /// Format a record according to this output format
    ///
    /// `message_key` names the record field holding the message.
    pub fn format(&self, record: &Record, message_key: &str) -> Result<String> {
        match self {
            OutputFormat::Json => json_content(record),
            OutputFormat::Text => Ok(format_text(record, message_key, false)),
            OutputFormat::ColoredText => Ok(format_text(record, message_key, true)),
            OutputFormat::Logfmt => Ok(format_logfmt(record)),
        }
    }

    /// Build a content formatter for this format
    pub fn formatter(&self, message_key: impl Into<String>) -> ContentFormatter {
        let format = self.clone();
        let message_key = message_key.into();
        Arc::new(move |record: &Record| format.format(record, &message_key))
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Escape line breaks and tabs so one record stays on one line
fn sanitize(text: &str) -> String {
    text.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn text_value(value: &Value) -> String {
    sanitize(&display_value(value))
}

fn format_text(record: &Record, message_key: &str, colored: bool) -> String {
    let severity = record.severity().map(text_value).unwrap_or_default();
    let severity = if colored {
        colorize_severity(record.severity(), severity)
    } else {
        severity
    };

    let mut line = format!(
        "[{}] [{}] [{}] {}",
        severity,
        sanitize(record.timestamp().unwrap_or_default()),
        sanitize(record.namespace().unwrap_or_default()),
        record.get(message_key).map(text_value).unwrap_or_default()
    );

    for (key, value) in record.iter() {
        if key == SEVERITY_KEY || key == TIMESTAMP_KEY || key == NAMESPACE_KEY || key == message_key
        {
            continue;
        }
        line.push(' ');
        line.push_str(&sanitize(key));
        line.push('=');
        line.push_str(&text_value(value));
    }

    line
}

#[cfg(feature = "console")]
fn colorize_severity(raw: Option<&Value>, text: String) -> String {
    use super::log_level::Severity;
    use colored::Colorize;

    match raw
        .and_then(Severity::from_value)
        .and_then(|s| s.resolve().ok())
    {
        Some(level) => text.color(level.color_code()).to_string(),
        None => text,
    }
}

#[cfg(not(feature = "console"))]
fn colorize_severity(_raw: Option<&Value>, text: String) -> String {
    text
}

fn format_logfmt(record: &Record) -> String {
    record
        .iter()
        .map(|(key, value)| {
            let formatted = match value {
                Value::String(s) => escape_logfmt_value(s),
                Value::Null => "null".to_string(),
                other => escape_logfmt_value(&other.to_string()),
            };
            format!("{}={}", escape_logfmt_key(key), formatted)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape a logfmt key (remove spaces and special chars)
fn escape_logfmt_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || *c == '.')
        .collect()
}

/// Escape a logfmt value (quote if it contains spaces, quotes or `=`)
fn escape_logfmt_value(value: &str) -> String {
    if value.is_empty()
        || value.contains(' ')
        || value.contains('"')
        || value.contains('=')
        || value.contains('\n')
        || value.contains('\r')
    {
        quote_logfmt_value(value)
    } else {
        value.to_string()
    }
}

fn quote_logfmt_value(value: &str) -> String {
    format!(
        "\"{}\"",
        value
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
            .replace('\r', "\\r")
    )
}
