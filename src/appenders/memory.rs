//! In-memory capturing sink

use crate::core::{render_line, ContentFormatter, Record, Result, Sink, StreamTarget};
use parking_lot::Mutex;

/// One line captured by [`MemorySink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedLine {
    pub target: StreamTarget,
    /// Written text including the trailing newline
    pub content: String,
}

/// Sink that keeps every written line in memory
///
/// Routing and formatting match [`ConsoleSink`](super::ConsoleSink), which
/// makes it a drop-in replacement for tests and for hosts that ship log
/// lines somewhere themselves.
///
/// # Example
///
/// ```
/// use scoped_logger::{Logger, MemorySink, StreamTarget};
/// use std::sync::Arc;
///
/// let sink = Arc::new(MemorySink::new());
/// let logger = Logger::builder("api")
///     .shared_sink(sink.clone())
///     .build()
///     .unwrap();
///
/// logger.error("boom");
/// assert_eq!(sink.lines()[0].target, StreamTarget::Stderr);
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<CapturedLine>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all captured lines in write order
    pub fn lines(&self) -> Vec<CapturedLine> {
        self.lines.lock().clone()
    }

    /// Captured text written to `target`, in write order
    pub fn contents(&self, target: StreamTarget) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .filter(|line| line.target == target)
            .map(|line| line.content.clone())
            .collect()
    }

    pub fn stdout(&self) -> Vec<String> {
        self.contents(StreamTarget::Stdout)
    }

    pub fn stderr(&self) -> Vec<String> {
        self.contents(StreamTarget::Stderr)
    }

    /// Remove and return everything captured so far
    pub fn take(&self) -> Vec<CapturedLine> {
        std::mem::take(&mut *self.lines.lock())
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }
}

impl Sink for MemorySink {
    fn write_content(&self, record: &Record, formatter: Option<&ContentFormatter>) -> Result<()> {
        if let Some((target, content)) = render_line(record, formatter)? {
            self.lines.lock().push(CapturedLine { target, content });
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
