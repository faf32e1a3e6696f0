//! Main logger implementation

use super::{
    config::{LoggerConfig, LoggerOptions},
    error::{LoggerError, Result},
    formatter::{ContentFormatter, LevelFormatter, OutputFormat},
    log_level::{LogLevel, Severity},
    metrics::LoggerMetrics,
    record::{Metadata, Record, NAMESPACE_KEY, SEVERITY_KEY, TIMESTAMP_KEY},
    sink::{panic_message, Sink},
    timestamp::{TimestampFn, TimestampFormat},
};
use crate::appenders::ConsoleSink;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Decide whether a record at `level` passes a `min_level` filter
///
/// Both sides may be a rank or a label in any case. Anything that does not
/// resolve to a known level fails the filter.
pub fn should_log(level: &Severity, min_level: &Severity) -> bool {
    matches!(
        (level.resolve(), min_level.resolve()),
        (Ok(level), Ok(min_level)) if level >= min_level
    )
}

/// A namespaced logger
///
/// Configuration is fixed at construction. Cloning is cheap and clones
/// share the sink and metrics.
#[derive(Clone)]
pub struct Logger {
    namespace: String,
    config: Arc<LoggerConfig>,
    sink: Arc<dyn Sink>,
    metrics: Arc<LoggerMetrics>,
}

macro_rules! severity_methods {
    ($($level:ident => $plain:ident, $with:ident;)+) => {
        $(
            #[doc = concat!("Log a message at `", stringify!($plain), "` severity")]
            #[inline]
            pub fn $plain(&self, message: impl Into<String>) {
                self.log(LogLevel::$level, message, Metadata::new());
            }

            #[doc = concat!("Log a message with metadata at `", stringify!($plain), "` severity")]
            #[inline]
            pub fn $with(&self, message: impl Into<String>, meta: Metadata) {
                self.log(LogLevel::$level, message, meta);
            }
        )+
    };
}

impl Logger {
    /// Create a logger with the default configuration writing to the console
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self::with_config(namespace, LoggerConfig::default(), Arc::new(ConsoleSink::new()))
    }

    /// Create a logger from an effective configuration and a sink
    pub fn with_config(
        namespace: impl Into<String>,
        config: LoggerConfig,
        sink: Arc<dyn Sink>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            config: Arc::new(config),
            sink,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// Namespace stamped on every record
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Effective configuration, fixed at construction
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Sink receiving accepted records
    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    /// Get the logger metrics
    ///
    /// # Example
    ///
    /// ```
    /// use scoped_logger::{Logger, MemorySink};
    /// use std::sync::Arc;
    ///
    /// let logger = Logger::builder("jobs")
    ///     .shared_sink(Arc::new(MemorySink::new()))
    ///     .build()
    ///     .unwrap();
    ///
    /// logger.debug("hidden");
    /// logger.info("shown");
    ///
    /// assert_eq!(logger.metrics().filtered_count(), 1);
    /// assert_eq!(logger.metrics().written_count(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Whether a call at `level` would pass the filter
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.config.min_level()
    }

    /// Log at `level`, reporting failures on stderr instead of returning them
    pub fn log(&self, level: LogLevel, message: impl Into<String>, meta: Metadata) {
        if let Err(e) = self.try_log(level, message, meta) {
            eprintln!(
                "[LOGGER ERROR] Logger '{}' failed to write to sink '{}': {}",
                self.namespace,
                self.sink.name(),
                e
            );
        }
    }

    /// Log at `level` and surface any failure
    ///
    /// Returns `Ok(true)` when the record reached the sink and `Ok(false)`
    /// when the filter rejected it.
    pub fn try_log(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        meta: Metadata,
    ) -> Result<bool> {
        self.emit(self.raw_record(level, message.into(), meta))
    }

    /// Raw record for a call: severity rank, message, base fields, metadata
    ///
    /// Later fields overwrite earlier ones with the same key, so metadata
    /// may replace the severity or the message.
    fn raw_record(&self, level: LogLevel, message: String, meta: Metadata) -> Record {
        let mut raw = Record::new();
        raw.insert(SEVERITY_KEY, level.rank());
        raw.insert(self.config.message_key(), message);
        raw.extend(self.config.base().clone());
        raw.extend(meta);
        raw
    }

    /// Filter, assemble and dispatch a raw record
    ///
    /// The raw `severity` field may be a rank or a label. A missing or
    /// unknown severity fails the filter. Accepted records are rebuilt as
    /// severity, timestamp, namespace, then the remaining raw fields in
    /// order, and written to the sink exactly once.
    pub fn emit(&self, raw: Record) -> Result<bool> {
        let level = match raw
            .severity()
            .and_then(Severity::from_value)
            .map(|severity| severity.resolve())
        {
            Some(Ok(level)) if self.is_enabled(level) => level,
            _ => {
                self.metrics.record_filtered();
                return Ok(false);
            }
        };

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            let record = self.assemble(level, raw);
            self.sink
                .write_content(&record, Some(self.config.format_content()))
        }));

        match outcome {
            Ok(Ok(())) => {
                self.metrics.record_written();
                Ok(true)
            }
            Ok(Err(e)) => {
                self.metrics.record_dropped();
                Err(e)
            }
            Err(panic_info) => {
                self.metrics.record_dropped();
                Err(LoggerError::other(format!(
                    "log pipeline panicked in logger '{}': {}",
                    self.namespace,
                    panic_message(&*panic_info)
                )))
            }
        }
    }

    fn assemble(&self, level: LogLevel, raw: Record) -> Record {
        let mut record = Record::new();
        record.insert(
            SEVERITY_KEY,
            (self.config.format_level())(level, level.to_str()),
        );
        record.insert(TIMESTAMP_KEY, (self.config.timestamp())());
        record.insert(NAMESPACE_KEY, self.namespace.clone());
        for (key, value) in raw.into_map() {
            if key != SEVERITY_KEY {
                record.insert(key, value);
            }
        }
        record
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.flush()
    }

    severity_methods! {
        Trace => trace, trace_with;
        Debug => debug, debug_with;
        Info => info, info_with;
        Warn => warn, warn_with;
        Error => error, error_with;
        Critical => critical, critical_with;
        Fatal => fatal, fatal_with;
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("namespace", &self.namespace)
            .field("config", &self.config)
            .field("sink", &self.sink.name())
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use scoped_logger::prelude::*;
///
/// let logger = Logger::builder("payments")
///     .min_level("debug")
///     .message_key("message")
///     .output_format(OutputFormat::Text)
///     .sink(ConsoleSink::new())
///     .build()
///     .unwrap();
/// ```
pub struct LoggerBuilder {
    namespace: String,
    options: LoggerOptions,
    sink: Option<Arc<dyn Sink>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            options: LoggerOptions::default(),
            sink: None,
        }
    }

    /// Replace all options collected so far
    #[must_use = "builder methods return a new value"]
    pub fn options(mut self, options: LoggerOptions) -> Self {
        self.options = options;
        self
    }

    /// Set minimum severity, as a level, rank or label
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: impl Into<Severity>) -> Self {
        self.options = self.options.min_level(level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn message_key(mut self, key: impl Into<String>) -> Self {
        self.options = self.options.message_key(key);
        self
    }

    /// Fields spread into every record before the call metadata
    #[must_use = "builder methods return a new value"]
    pub fn base(mut self, base: Metadata) -> Self {
        self.options = self.options.base(base);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp(mut self, clock: TimestampFn) -> Self {
        self.options = self.options.timestamp(clock);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.options = self.options.timestamp_format(format);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format_content(mut self, formatter: ContentFormatter) -> Self {
        self.options = self.options.format_content(formatter);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format_level(mut self, formatter: LevelFormatter) -> Self {
        self.options = self.options.format_level(formatter);
        self
    }

    /// Use a built-in output format
    ///
    /// The format reads the message from the final message key, whichever
    /// order the setters are called in.
    #[must_use = "builder methods return a new value"]
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.options = self.options.output_format(format);
        self
    }

    /// Write to `sink` instead of the console
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Write to a sink shared with other loggers
    #[must_use = "builder methods return a new value"]
    pub fn shared_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Build the Logger
    ///
    /// Fails with [`LoggerError::InvalidSeverity`] when the minimum
    /// severity is not a known rank or label.
    pub fn build(self) -> Result<Logger> {
        let config = LoggerConfig::from_options(self.options)?;
        let sink = self
            .sink
            .unwrap_or_else(|| Arc::new(ConsoleSink::new()));
        Ok(Logger::with_config(self.namespace, config, sink))
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder(namespace: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(namespace)
    }
}
