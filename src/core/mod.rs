//! Core logger types and traits

pub mod config;
pub mod error;
pub mod formatter;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod record;
pub mod sink;
pub mod timestamp;

pub use config::{LoggerConfig, LoggerOptions, LoggerSettings};
pub use error::{LoggerError, Result};
pub use formatter::{
    content_fn, json_content, label_level, level_fn, rank_level, try_content_fn,
    ContentFormatter, LevelFormatter, OutputFormat,
};
pub use log_level::{label_to_rank, rank_to_label, LogLevel, Severity, ERROR_STREAM_THRESHOLD};
pub use logger::{should_log, Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use record::{
    Metadata, Record, DEFAULT_MESSAGE_KEY, NAMESPACE_KEY, SEVERITY_KEY, TIMESTAMP_KEY,
};
pub use sink::{render_line, select_stream, Sink, StreamTarget};
pub use timestamp::{default_timestamp, TimestampFn, TimestampFormat};
