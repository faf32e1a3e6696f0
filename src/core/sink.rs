//! Sink trait for log output destinations

use super::error::{LoggerError, Result};
use super::formatter::ContentFormatter;
use super::log_level::{LogLevel, ERROR_STREAM_THRESHOLD};
use super::record::Record;
use serde_json::Value;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// A destination for finished records
///
/// Implementations pick an output stream with [`select_stream`] and render
/// the line with [`render_line`], so every sink routes and formats the same
/// way.
pub trait Sink: Send + Sync {
    /// Write one record, formatted by `formatter` when one is given
    fn write_content(&self, record: &Record, formatter: Option<&ContentFormatter>) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

/// Physical stream a record is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamTarget {
    Stdout,
    Stderr,
}

/// Choose the stream for a record's `severity` value
///
/// Labels `error`, `critical` and `fatal` (any case) and numeric ranks of
/// 50 or more go to the error stream; everything else goes to stdout.
pub fn select_stream(severity: &Value) -> StreamTarget {
    let is_error = match severity {
        Value::String(label) => label
            .parse::<LogLevel>()
            .is_ok_and(LogLevel::is_error),
        Value::Number(rank) => rank
            .as_f64()
            .is_some_and(|r| r >= f64::from(ERROR_STREAM_THRESHOLD)),
        _ => false,
    };

    if is_error {
        StreamTarget::Stderr
    } else {
        StreamTarget::Stdout
    }
}

/// Produce the stream and newline-terminated text for a record
///
/// Returns `Ok(None)` for a record without a `severity` field. A formatter
/// that panics is reported as a formatter error.
pub fn render_line(
    record: &Record,
    formatter: Option<&ContentFormatter>,
) -> Result<Option<(StreamTarget, String)>> {
    let Some(severity) = record.severity() else {
        return Ok(None);
    };
    let target = select_stream(severity);

    let mut content = match formatter {
        Some(format) => match catch_unwind(AssertUnwindSafe(|| format(record))) {
            Ok(result) => result?,
            Err(panic_info) => {
                return Err(LoggerError::formatter("content", panic_message(&*panic_info)))
            }
        },
        None => record.to_string(),
    };
    content.push('\n');

    Ok(Some((target, content)))
}

pub(crate) fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::formatter::{content_fn, try_content_fn};
    use serde_json::json;

    #[test]
    fn test_select_stream_by_label() {
        assert_eq!(select_stream(&json!("ERROR")), StreamTarget::Stderr);
        assert_eq!(select_stream(&json!("critical")), StreamTarget::Stderr);
        assert_eq!(select_stream(&json!("Fatal")), StreamTarget::Stderr);
        assert_eq!(select_stream(&json!("WARN")), StreamTarget::Stdout);
        assert_eq!(select_stream(&json!("info")), StreamTarget::Stdout);
        assert_eq!(select_stream(&json!("E")), StreamTarget::Stdout);
        assert_eq!(select_stream(&json!("eRrOr")), StreamTarget::Stderr);
        assert_eq!(select_stream(&json!("loud")), StreamTarget::Stdout);
    }

    #[test]
    fn test_select_stream_by_rank() {
        assert_eq!(select_stream(&json!(50)), StreamTarget::Stderr);
        assert_eq!(select_stream(&json!(70)), StreamTarget::Stderr);
        assert_eq!(select_stream(&json!(40)), StreamTarget::Stdout);
        assert_eq!(select_stream(&json!(10)), StreamTarget::Stdout);
        assert_eq!(select_stream(&json!(null)), StreamTarget::Stdout);
    }

    #[test]
    fn test_render_line_without_severity() {
        let mut record = Record::new();
        record.insert("msg", "orphan");
        assert!(render_line(&record, None).unwrap().is_none());
    }

    #[test]
    fn test_render_line_with_formatter() {
        let mut record = Record::new();
        record.insert("severity", "ERROR");
        let formatter = content_fn(|_| "X".to_string());

        let (target, line) = render_line(&record, Some(&formatter)).unwrap().unwrap();
        assert_eq!(target, StreamTarget::Stderr);
        assert_eq!(line, "X\n");
    }

    #[test]
    fn test_render_line_without_formatter() {
        let mut record = Record::new();
        record.insert("severity", "INFO");
        record.insert("msg", "plain");

        let (target, line) = render_line(&record, None).unwrap().unwrap();
        assert_eq!(target, StreamTarget::Stdout);
        assert_eq!(line, "{\"severity\":\"INFO\",\"msg\":\"plain\"}\n");
    }

    #[test]
    fn test_render_line_formatter_panic() {
        let mut record = Record::new();
        record.insert("severity", "INFO");
        let formatter = try_content_fn(|_| panic!("bad formatter"));

        let err = render_line(&record, Some(&formatter)).unwrap_err();
        assert!(matches!(err, LoggerError::FormatterError { .. }));
        assert!(err.to_string().contains("bad formatter"));
    }
}
