//! # Scoped Logger
//!
//! A small structured logging facade. Each [`Logger`] carries a namespace
//! and a fixed configuration, filters calls against a minimum severity,
//! assembles an ordered record and hands it to a [`Sink`].
//!
//! ## Features
//!
//! - **Seven severities**: trace, debug, info, warn, error, critical, fatal
//!   (ranks 10 to 70), addressable by rank or by label in any case
//! - **Ordered records**: severity, timestamp, namespace, message, then
//!   metadata in call order
//! - **Pluggable formatting**: JSON by default, text and logfmt built in,
//!   or any closure
//! - **Stream routing**: error and above go to stderr, the rest to stdout
//!
//! ```
//! use scoped_logger::{get_logger, LoggerOptions, Metadata};
//!
//! let logger = get_logger("api", LoggerOptions::new().min_level("debug")).unwrap();
//! logger.debug_with("request", Metadata::new().with_field("path", "/health"));
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{CapturedLine, ConsoleSink, MemorySink};
    #[cfg(feature = "file")]
    pub use crate::appenders::FileSink;
    pub use crate::core::{
        ContentFormatter, LevelFormatter, LogLevel, Logger, LoggerBuilder, LoggerConfig,
        LoggerError, LoggerMetrics, LoggerOptions, LoggerSettings, Metadata, OutputFormat, Record,
        Result, Severity, Sink, StreamTarget, TimestampFn, TimestampFormat,
    };
    pub use crate::get_logger;
}

pub use appenders::{CapturedLine, ConsoleSink, MemorySink};
#[cfg(feature = "file")]
pub use appenders::FileSink;
pub use core::{
    content_fn, label_to_rank, level_fn, rank_to_label, should_log, try_content_fn,
    ContentFormatter, LevelFormatter, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    LoggerMetrics, LoggerOptions, LoggerSettings, Metadata, OutputFormat, Record, Result,
    Severity, Sink, StreamTarget, TimestampFn, TimestampFormat,
};

/// Create a console logger for `namespace`
///
/// `options` are overlaid onto the defaults (minimum severity `info`,
/// message key `msg`, local `YYYY-MM-DD HH:mm:ss` timestamps, JSON
/// content, uppercase labels). Every call builds an independent
/// configuration.
///
/// Fails with [`LoggerError::InvalidSeverity`] when the minimum severity
/// is not a known rank or label.
pub fn get_logger(
    namespace: impl Into<String>,
    options: impl Into<Option<LoggerOptions>>,
) -> Result<Logger> {
    Logger::builder(namespace)
        .options(options.into().unwrap_or_default())
        .build()
}
