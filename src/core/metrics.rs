//! Router metrics for observability
//!
//! Sink failures are absorbed by the router; these counters are the only
//! trace they leave.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one router's fan-out
///
/// # Example
///
/// ```
/// use rust_log_router::RouterMetrics;
///
/// let metrics = RouterMetrics::new();
/// metrics.record_delivered();
/// metrics.record_failure();
///
/// assert_eq!(metrics.delivered(), 1);
/// assert_eq!(metrics.sink_failures(), 1);
/// ```
#[derive(Debug)]
pub struct RouterMetrics {
    /// Messages accepted by a sink without error
    delivered: AtomicU64,

    /// Per-sink deliveries skipped by a rule or the sink's own threshold
    filtered: AtomicU64,

    /// Sink calls that returned an error or panicked
    sink_failures: AtomicU64,
}

impl RouterMetrics {
    pub const fn new() -> Self {
        Self {
            delivered: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Failure rate among attempted deliveries, as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing was attempted.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.sink_failures() as f64;
        let total = self.delivered() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.delivered.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for RouterMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RouterMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            delivered: AtomicU64::new(self.delivered()),
            filtered: AtomicU64::new(self.filtered()),
            sink_failures: AtomicU64::new(self.sink_failures()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = RouterMetrics::new();
        assert_eq!(metrics.delivered(), 0);
        assert_eq!(metrics.filtered(), 0);
        assert_eq!(metrics.sink_failures(), 0);
    }

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = RouterMetrics::new();
        assert_eq!(metrics.record_failure(), 0);
        assert_eq!(metrics.record_failure(), 1);
        assert_eq!(metrics.sink_failures(), 2);
    }

    #[test]
    fn test_failure_rate() {
        let metrics = RouterMetrics::new();
        assert_eq!(metrics.failure_rate(), 0.0);

        for _ in 0..90 {
            metrics.record_delivered();
        }
        for _ in 0..10 {
            metrics.record_failure();
        }

        let rate = metrics.failure_rate();
        assert!((9.9..=10.1).contains(&rate), "Failure rate was {}", rate);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let metrics = RouterMetrics::new();
        metrics.record_delivered();

        let snapshot = metrics.clone();
        metrics.record_delivered();
        metrics.reset();

        assert_eq!(snapshot.delivered(), 1);
        assert_eq!(metrics.delivered(), 0);
    }
}
