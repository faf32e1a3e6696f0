//! Timestamp providers
//!
//! The logger only needs a no-argument function returning a string. This
//! module supplies that function type plus a set of standard formats that
//! can be turned into one.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Clock used to stamp each record
pub type TimestampFn = Arc<dyn Fn() -> String + Send + Sync>;

/// strftime equivalent of `YYYY-MM-DD HH:mm:ss`
pub const DEFAULT_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Standardized timestamp format options
///
/// # Examples
///
/// ```
/// use scoped_logger::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::LocalDateTime.format(&at), "2025-01-08 10:30:45");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Wall-clock date and time in local time: `2025-01-08 10:30:45`
    #[default]
    LocalDateTime,

    /// ISO 8601 in UTC with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// RFC 3339 with the zone offset: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    Custom(String),

    /// Token pattern using `YYYY`, `MM`, `DD`, `HH`, `mm` and `ss`
    ///
    /// Everything that is not a token is copied through literally.
    Pattern(String),
}

impl TimestampFormat {
    /// Format a date-time according to this format
    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match self {
            TimestampFormat::LocalDateTime => datetime.format(DEFAULT_DATE_TIME_FORMAT).to_string(),
            TimestampFormat::Iso8601 => datetime
                .with_timezone(&Utc)
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
            TimestampFormat::Pattern(pattern) => {
                datetime.format(&pattern_to_strftime(pattern)).to_string()
            }
        }
    }

    /// Check that a `Custom` strftime string only uses known specifiers
    ///
    /// chrono fails while rendering an unknown specifier, which would drop
    /// every record stamped with it.
    pub fn validate(&self) -> Result<()> {
        if let TimestampFormat::Custom(format_str) = self {
            if StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error)) {
                return Err(LoggerError::config(
                    "TimestampFormat",
                    format!("invalid strftime format '{}'", format_str),
                ));
            }
        }
        Ok(())
    }

    /// Format the current local time
    #[must_use]
    pub fn now(&self) -> String {
        self.format(&Local::now())
    }

    /// Turn this format into a clock for the logger configuration
    #[must_use]
    pub fn clock(&self) -> TimestampFn {
        let format = self.clone();
        Arc::new(move || format.now())
    }
}

/// Default clock: current local time as `YYYY-MM-DD HH:mm:ss`
pub fn default_timestamp() -> String {
    TimestampFormat::LocalDateTime.now()
}

/// A clock that always returns the same value
pub fn fixed(value: impl Into<String>) -> TimestampFn {
    let value = value.into();
    Arc::new(move || value.clone())
}

fn pattern_to_strftime(pattern: &str) -> String {
    const TOKENS: [(&str, &str); 6] = [
        ("YYYY", "%Y"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("mm", "%M"),
        ("ss", "%S"),
    ];

    let mut out = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;
    'outer: while !rest.is_empty() {
        for (token, spec) in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(spec);
                rest = tail;
                continue 'outer;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            if c == '%' {
                out.push_str("%%");
            } else {
                out.push(c);
            }
        }
        rest = chars.as_str();
    }
    out
}
