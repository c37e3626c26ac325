//! Settle-time debouncer for bursty events.
//!
//! Holds the latest value of a burst and releases it only after no newer
//! value arrived for the settle time. The caller supplies the current time
//! on every call, so the debouncer never reads a clock and behaves the same
//! under a host's frame clock and in tests.

use std::time::{Duration, Instant};

/// Keeps the most recent pending value until it has been stable long enough.
///
/// Updating while a value is pending replaces it and restarts the timer.
#[derive(Debug)]
pub struct Debouncer<V> {
    /// Latest value waiting to settle.
    pending: Option<PendingValue<V>>,
    /// How long a value must be stable before being released.
    settle_time: Duration,
}

#[derive(Debug, Clone)]
struct PendingValue<V> {
    value: V,
    last_updated: Instant,
}

impl<V> Debouncer<V> {
    /// Creates a debouncer with the specified settle time.
    #[must_use]
    pub const fn new(settle_time: Duration) -> Self { Self { pending: None, settle_time } }

    /// Records a value, replacing any pending one.
    ///
    /// Returns `true` if nothing was pending before.
    pub fn update(&mut self, value: V, now: Instant) -> bool {
        self.pending.replace(PendingValue { value, last_updated: now }).is_none()
    }

    /// Takes the pending value if it has been stable for the settle time.
    pub fn take_settled(&mut self, now: Instant) -> Option<V> {
        let settled = self.pending.as_ref().is_some_and(|pending| {
            now.saturating_duration_since(pending.last_updated) >= self.settle_time
        });
        if settled { self.pending.take().map(|pending| pending.value) } else { None }
    }

    /// Instant at which the pending value settles.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.last_updated + self.settle_time)
    }

    /// The configured settle time.
    #[must_use]
    pub const fn settle_time(&self) -> Duration { self.settle_time }

    /// Whether a value is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool { self.pending.is_some() }

    /// Drops the pending value.
    pub fn clear(&mut self) { self.pending = None; }
}
