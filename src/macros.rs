//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`.
//!
//! # Examples
//!
//! ```
//! use scoped_logger::prelude::*;
//! use scoped_logger::{info, meta};
//!
//! let logger = Logger::new("server");
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With metadata
//! info!(logger, meta! { "port" => port }; "Server listening");
//! ```

/// Build [`Metadata`](crate::Metadata) from `key => value` pairs.
///
/// # Examples
///
/// ```
/// use scoped_logger::meta;
///
/// let fields = meta! { "user" => "alice", "attempts" => 3 };
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! meta {
    () => {
        $crate::Metadata::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Metadata::new()$(.with_field($key, $value))+
    };
}

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use scoped_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use scoped_logger::{log, meta};
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// log!(logger, LogLevel::Warn, meta! { "code" => 429 }; "Rate limited");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $meta:expr; $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+), $meta)
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+), $crate::Metadata::new())
    };
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use scoped_logger::prelude::*;
/// # let logger = Logger::builder("app").min_level("trace").build().unwrap();
/// use scoped_logger::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use scoped_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use scoped_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use scoped_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use scoped_logger::{error, meta};
/// error!(logger, "Failed to connect to database");
/// error!(logger, meta! { "status" => 404 }; "Request failed");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
