//! Console sink implementation

use crate::core::{render_line, ContentFormatter, Record, Result, Sink, StreamTarget};
use std::io::Write;

/// Reference sink writing to the process stdout and stderr
///
/// Records at `error` and above go to stderr, everything else to stdout.
/// Each line is written with a single `write_all` on the locked stream, so
/// lines from different loggers never interleave mid-line.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for ConsoleSink {
    fn write_content(&self, record: &Record, formatter: Option<&ContentFormatter>) -> Result<()> {
        let Some((target, line)) = render_line(record, formatter)? else {
            return Ok(());
        };

        match target {
            StreamTarget::Stdout => std::io::stdout().lock().write_all(line.as_bytes())?,
            StreamTarget::Stderr => std::io::stderr().lock().write_all(line.as_bytes())?,
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::formatter::content_fn;

    #[test]
    fn test_console_sink_writes() {
        let sink = ConsoleSink::new();
        let mut record = Record::new();
        record.insert("severity", "INFO");
        record.insert("msg", "console sink test");

        let formatter = content_fn(|r| format!("test-line {}", r.len()));
        assert!(sink.write_content(&record, Some(&formatter)).is_ok());
        assert!(sink.write_content(&record, None).is_ok());
        assert!(sink.flush().is_ok());
    }

    #[test]
    fn test_console_sink_skips_missing_severity() {
        let sink = ConsoleSink::new();
        let mut record = Record::new();
        record.insert("msg", "no severity");

        let formatter = content_fn(|_| panic!("formatter must not run"));
        assert!(sink.write_content(&record, Some(&formatter)).is_ok());
    }

    #[test]
    fn test_name() {
        assert_eq!(ConsoleSink::new().name(), "console");
    }
}
