//! Logger metrics for observability
//!
//! Counts what happened to each logged call: written to the sink, muted as
//! a repeat, filtered by level, or failed in the sink.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters kept by a [`crate::Logger`]
///
/// # Example
///
/// ```
/// use rust_frame_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_written();
/// metrics.record_muted();
///
/// assert_eq!(metrics.written_count(), 1);
/// assert_eq!(metrics.muted_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Messages handed to the sink successfully
    written: AtomicU64,

    /// Messages suppressed as consecutive repeats
    muted: AtomicU64,

    /// Calls dropped by the level filter
    filtered: AtomicU64,

    /// Messages the sink rejected
    failed: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            written: AtomicU64::new(0),
            muted: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn written_count(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn muted_count(&self) -> u64 {
        self.muted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_count(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Record a successful write, returning the previous count
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_muted(&self) -> u64 {
        self.muted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.written.store(0, Ordering::Relaxed);
        self.muted.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
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
            muted: AtomicU64::new(self.muted_count()),
            filtered: AtomicU64::new(self.filtered_count()),
            failed: AtomicU64::new(self.failed_count()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.written_count(), 0);
        assert_eq!(metrics.muted_count(), 0);
        assert_eq!(metrics.filtered_count(), 0);
        assert_eq!(metrics.failed_count(), 0);
    }

    #[test]
    fn test_record_returns_previous() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_muted(), 0);
        assert_eq!(metrics.record_muted(), 1);
        assert_eq!(metrics.muted_count(), 2);
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = LoggerMetrics::new();
        metrics.record_written();
        metrics.record_filtered();
        metrics.record_failed();

        metrics.reset();

        assert_eq!(metrics.written_count(), 0);
        assert_eq!(metrics.filtered_count(), 0);
        assert_eq!(metrics.failed_count(), 0);
    }

    #[test]
    fn test_metrics_clone_is_snapshot() {
        let metrics = LoggerMetrics::new();
        metrics.record_written();
        metrics.record_written();

        let snapshot = metrics.clone();
        metrics.record_written();

        assert_eq!(snapshot.written_count(), 2);
        assert_eq!(metrics.written_count(), 3);
    }
}
