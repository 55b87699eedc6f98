//! Opt-in instrumentation of the ring/SCQ's own lock-free protocol.
//!
//! This is *not* metrics about a caller's workload — that stays out of
//! scope entirely. It is a handful of relaxed atomic counters
//! tracking contention inside the data structure itself: how often a thread
//! helped another producer's `tail` along, how many CAS attempts a
//! successful operation needed, and how often callers observed full/empty.
//! Counting is gated behind [`crate::Config::enable_metrics`] so the counters
//! cost nothing when unused.

use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counters updated during ring/SCQ operation.
#[derive(Debug, Default)]
pub struct Metrics {
    enqueues: AtomicU64,
    dequeues: AtomicU64,
    helper_cas: AtomicU64,
    cas_retries: AtomicU64,
    full_rejections: AtomicU64,
    empty_rejections: AtomicU64,
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn record_enqueue(&self) {
        self.enqueues.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_dequeue(&self) {
        self.dequeues.fetch_add(1, Ordering::Relaxed);
    }

    /// A thread advanced `tail` on behalf of another producer whose cell
    /// write had already committed (the enqueue protocol's "helping" case).
    #[inline]
    pub(crate) fn record_helper_cas(&self) {
        self.helper_cas.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_retry(&self) {
        self.cas_retries.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_full_rejection(&self) {
        self.full_rejections.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_empty_rejection(&self) {
        self.empty_rejections.fetch_add(1, Ordering::Relaxed);
    }

    /// Takes a consistent-enough snapshot of the counters for reporting.
    ///
    /// Each field is read independently with a relaxed load, so the
    /// snapshot as a whole is not atomic — acceptable for instrumentation,
    /// not for correctness decisions.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            enqueues: self.enqueues.load(Ordering::Relaxed),
            dequeues: self.dequeues.load(Ordering::Relaxed),
            helper_cas: self.helper_cas.load(Ordering::Relaxed),
            cas_retries: self.cas_retries.load(Ordering::Relaxed),
            full_rejections: self.full_rejections.load(Ordering::Relaxed),
            empty_rejections: self.empty_rejections.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time read of [`Metrics`]' counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub enqueues: u64,
    pub dequeues: u64,
    pub helper_cas: u64,
    pub cas_retries: u64,
    pub full_rejections: u64,
    pub empty_rejections: u64,
}
