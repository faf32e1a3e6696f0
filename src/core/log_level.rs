//! Log level definitions and the severity registry
//!
//! Every conversion between a numeric rank and a string label goes through
//! this module. `LogLevel` is the canonical internal form; `Severity` is the
//! loose form accepted at configuration boundaries.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum LogLevel {
    Trace = 10,
    Debug = 20,
    #[default]
    Info = 30,
    Warn = 40,
    Error = 50,
    Critical = 60,
    Fatal = 70,
}

/// Rank at and above which records are routed to the error stream
pub const ERROR_STREAM_THRESHOLD: u8 = LogLevel::Error.rank();

impl LogLevel {
    /// All levels in ascending severity order
    pub const ALL: [LogLevel; 7] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Critical,
        LogLevel::Fatal,
    ];

    /// Numeric rank of this level
    #[inline]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Canonical uppercase label
    pub const fn to_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
            LogLevel::Fatal => "FATAL",
        }
    }

    pub const fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            10 => Some(LogLevel::Trace),
            20 => Some(LogLevel::Debug),
            30 => Some(LogLevel::Info),
            40 => Some(LogLevel::Warn),
            50 => Some(LogLevel::Error),
            60 => Some(LogLevel::Critical),
            70 => Some(LogLevel::Fatal),
            _ => None,
        }
    }

    /// Whether records of this level belong on the error stream
    #[inline]
    pub const fn is_error(self) -> bool {
        self.rank() >= ERROR_STREAM_THRESHOLD
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Trace => BrightBlack,
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
            LogLevel::Critical => Magenta,
            LogLevel::Fatal => BrightRed,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" => Ok(LogLevel::Critical),
            "FATAL" => Ok(LogLevel::Fatal),
            _ => Err(LoggerError::invalid_severity(s)),
        }
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = LoggerError;

    fn try_from(rank: u8) -> Result<Self> {
        LogLevel::from_rank(rank).ok_or_else(|| LoggerError::invalid_severity(rank.to_string()))
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Severity::deserialize(deserializer)?
            .resolve()
            .map_err(serde::de::Error::custom)
    }
}

/// Look up the canonical label for a numeric rank
pub fn rank_to_label(rank: u8) -> Result<&'static str> {
    LogLevel::try_from(rank).map(LogLevel::to_str)
}

/// Look up the numeric rank for a label, ignoring case
pub fn label_to_rank(label: &str) -> Result<u8> {
    label.parse::<LogLevel>().map(LogLevel::rank)
}

/// A severity as supplied by a caller: either a numeric rank or a label
///
/// Resolution to a [`LogLevel`] fails for anything outside the seven known
/// ranks and labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Severity {
    Rank(i64),
    Label(String),
}

impl Severity {
    pub fn resolve(&self) -> Result<LogLevel> {
        match self {
            Severity::Rank(rank) => u8::try_from(*rank)
                .ok()
                .and_then(LogLevel::from_rank)
                .ok_or_else(|| LoggerError::invalid_severity(rank.to_string())),
            Severity::Label(label) => label.parse(),
        }
    }

    /// Read a severity out of a record field
    ///
    /// Integers become ranks and strings become labels; any other JSON
    /// value is not a severity at all.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_i64().map(Severity::Rank),
            serde_json::Value::String(s) => Some(Severity::Label(s.clone())),
            _ => None,
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Label("info".to_string())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Rank(rank) => write!(f, "{}", rank),
            Severity::Label(label) => write!(f, "{}", label),
        }
    }
}

impl From<LogLevel> for Severity {
    fn from(level: LogLevel) -> Self {
        Severity::Rank(i64::from(level.rank()))
    }
}

impl From<u8> for Severity {
    fn from(rank: u8) -> Self {
        Severity::Rank(i64::from(rank))
    }
}

impl From<i32> for Severity {
    fn from(rank: i32) -> Self {
        Severity::Rank(i64::from(rank))
    }
}

impl From<i64> for Severity {
    fn from(rank: i64) -> Self {
        Severity::Rank(rank)
    }
}

impl From<&str> for Severity {
    fn from(label: &str) -> Self {
        Severity::Label(label.to_string())
    }
}

impl From<String> for Severity {
    fn from(label: String) -> Self {
        Severity::Label(label)
    }
}
