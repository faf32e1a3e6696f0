//! Logger metrics for observability
//!
//! Counts what happened to each log call: written to the sink, filtered out
//! by the minimum severity, or dropped because formatting or writing failed.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use scoped_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_dropped();
/// metrics.record_written();
///
/// assert_eq!(metrics.dropped_count(), 1);
/// assert_eq!(metrics.written_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records handed to the sink successfully
    written: AtomicU64,

    /// Calls rejected by the severity filter
    filtered: AtomicU64,

    /// Records lost to a formatter or sink failure
    dropped: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            written: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn written_count(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Record a written entry, returning the previous count
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a filtered call, returning the previous count
    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a dropped entry, returning the previous count
    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped.fetch_add(1, Ordering::Relaxed)
    }

    /// Get drop rate as a percentage (0.0 - 100.0) of records that passed
    /// the filter
    ///
    /// Returns 0.0 if nothing has passed the filter yet.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = self.written_count() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.written.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.dropped.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            written: AtomicU64::new(self.written_count()),
            filtered: AtomicU64::new(self.filtered_count()),
            dropped: AtomicU64::new(self.dropped_count()),
        }
    }
}
