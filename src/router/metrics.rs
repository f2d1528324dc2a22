use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

/// Counters maintained by a [`Router`](super::Router).
///
/// All counters use relaxed atomics; they are monitoring figures, not
/// synchronisation points.
#[derive(Debug, Default)]
pub struct RoutingMetrics {
    dispatched: AtomicUsize,
    not_found: AtomicUsize,
    lookups: AtomicUsize,
    total_lookup_ns: AtomicU64,
}

impl RoutingMetrics {
    /// Create a metrics block with all counters at zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests handed to a matched route's handler
    #[must_use]
    pub fn dispatched(&self) -> usize {
        self.dispatched.load(Ordering::Relaxed)
    }

    /// Requests answered with the not-found response
    #[must_use]
    pub fn not_found(&self) -> usize {
        self.not_found.load(Ordering::Relaxed)
    }

    /// Route lookups performed, matched or not
    #[must_use]
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    /// Mean time spent scanning the route table.
    ///
    /// Returns zero before the first lookup.
    #[must_use]
    pub fn average_lookup_latency(&self) -> Duration {
        let count = self.lookups.load(Ordering::Relaxed) as u64;
        if count == 0 {
            Duration::from_nanos(0)
        } else {
            Duration::from_nanos(self.total_lookup_ns.load(Ordering::Relaxed) / count)
        }
    }

    pub(crate) fn record_lookup(&self, elapsed: Duration) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.total_lookup_ns
            .fetch_add(elapsed.as_nanos() as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_dispatch(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }
}
