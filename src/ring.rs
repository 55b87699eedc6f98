//! A lock-free, bounded, multi-producer multi-consumer ring of 32-bit words.
//!
//! Each slot packs a cycle counter and a payload into one 64-bit cell so a
//! single `compare_exchange` both claims a slot and publishes its value —
//! no separate "reserve" step, no per-slot lock. Physical slot order is
//! striped across cache lines by [`remap`] so that logically adjacent
//! indices (the ones producers and consumers contend on back to back) land
//! on different cache lines instead of hammering the same one.

use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_utils::CachePadded;

use crate::backoff::Backoff;
use crate::cell::{Cell, Entry};
use crate::config::{Config, ENTRIES_PER_LINE};
use crate::error::RingError;
use crate::invariants::{debug_assert_bounded_count, debug_assert_cycle_non_decreasing};
use crate::metrics::Metrics;

/// Maps a logical slot index to its physical position in the backing buffer.
///
/// Splits the index into `(line, offset)` within a `capacity`-slot ring laid
/// out as `lines` cache lines of `ENTRIES_PER_LINE` cells each, then
/// transposes the two: consecutive logical indices advance one line at a
/// time instead of one cell at a time, so two producers racing on
/// consecutive slots touch different lines.
#[inline]
#[must_use]
pub(crate) fn remap(index: usize, lines: usize) -> usize {
    if lines <= 1 {
        return index;
    }
    let line = index % lines;
    let offset = index / lines;
    line * ENTRIES_PER_LINE + offset
}

/// A lock-free bounded MPMC ring buffer of `u32` payloads.
///
/// `head` and `tail` are unbounded `u64` counters, never wrapped modulo
/// `capacity` directly — only their derived index and cycle are. This keeps
/// the classic ABA problem off the table: two claims of the same physical
/// slot are always stamped with strictly increasing cycles.
pub struct Ring {
    head: CachePadded<AtomicU64>,
    tail: CachePadded<AtomicU64>,
    buf: Box<[Cell]>,
    config: Config,
    metrics: Metrics,
}

impl Ring {
    /// Builds a ring of `capacity` slots.
    ///
    /// `full` selects the initial occupancy: `false` starts empty (`head ==
    /// tail == capacity`), `true` starts completely full with every slot
    /// holding payload `0` at cycle `0` (`head == 0`, `tail == capacity`).
    /// Every cell starts zeroed either way — only the two counters differ.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::InvalidCapacity`] if `capacity` is zero or not a
    /// multiple of the cache-line stripe width.
    pub fn new(capacity: usize, full: bool) -> Result<Self, RingError> {
        let config = Config::try_new(capacity, false).ok_or(RingError::InvalidCapacity {
            capacity,
            entries_per_line: ENTRIES_PER_LINE,
        })?;
        Self::with_config(config, full)
    }

    /// Like [`Ring::new`], but takes a full [`Config`] (enabling metrics if requested).
    ///
    /// # Errors
    ///
    /// Returns [`RingError::InvalidCapacity`] under the same conditions as [`Ring::new`].
    pub fn with_config(config: Config, full: bool) -> Result<Self, RingError> {
        let capacity = config.capacity();
        let buf: Box<[Cell]> = (0..capacity).map(|_| Cell::zeroed()).collect();

        let (head, tail) = if full { (0, capacity as u64) } else { (capacity as u64, capacity as u64) };

        Ok(Self {
            head: CachePadded::new(AtomicU64::new(head)),
            tail: CachePadded::new(AtomicU64::new(tail)),
            buf,
            config,
            metrics: Metrics::new(),
        })
    }

    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.config.capacity()
    }

    #[inline]
    #[must_use]
    pub const fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Snapshot length: `tail - head` read as two independent atomics.
    ///
    /// Not linearizable under concurrent use — a consistent value only if no
    /// other thread is mid-operation — but useful for tests and reporting.
    #[must_use]
    pub fn len(&self) -> usize {
        let h = self.head.load(Ordering::SeqCst);
        let t = self.tail.load(Ordering::SeqCst);
        let count = t.wrapping_sub(h) as usize;
        debug_assert_bounded_count!(count, self.capacity());
        count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }

    #[inline]
    fn index(&self, p: u64) -> usize {
        (p % self.capacity() as u64) as usize
    }

    #[inline]
    fn cycle(&self, p: u64) -> u32 {
        (p / self.capacity() as u64) as u32
    }

    #[inline]
    fn slot(&self, p: u64) -> &Cell {
        &self.buf[remap(self.index(p), self.config.lines())]
    }

    fn record(&self, f: impl FnOnce(&Metrics)) {
        if self.config.enable_metrics {
            f(&self.metrics);
        }
    }

    /// Enqueues `val`, assuming the ring is not currently full.
    ///
    /// Calling this on a full ring is a logic error: the CAS loop will spin
    /// forever waiting for a cell that a consumer never frees, since no
    /// dequeue is implied to be in flight. Callers that cannot guarantee
    /// non-fullness externally (a free-list or a semaphore, say) should use
    /// [`Ring::try_enqueue`] instead.
    pub fn enqueue(&self, val: u32) {
        assert!(self.enqueue_inner(val, false), "enqueue_inner must succeed when bail_if_full is false");
    }

    /// Enqueues `val`, returning `false` instead of blocking if the ring is
    /// self-evidently full.
    ///
    /// The fullness check is re-taken on every retry from a fresh
    /// `head`/`tail` snapshot, so this can still return `false` under a
    /// race where another producer fills the last slot first — it never
    /// silently overwrites or blocks past the point where the ring is
    /// observed full.
    #[must_use]
    pub fn try_enqueue(&self, val: u32) -> bool {
        self.enqueue_inner(val, true)
    }

    fn enqueue_inner(&self, val: u32, bail_if_full: bool) -> bool {
        let mut backoff = Backoff::new();
        loop {
            let t = self.tail.load(Ordering::SeqCst);

            if bail_if_full {
                let h = self.head.load(Ordering::SeqCst);
                if t.wrapping_sub(h) as usize >= self.capacity() {
                    self.record(Metrics::record_full_rejection);
                    return false;
                }
            }

            let cell = self.slot(t);
            let cyc_t = self.cycle(t);
            let current = cell.load(Ordering::SeqCst);

            if current.cycle == cyc_t {
                // Another producer already wrote this slot for this lap but
                // hasn't advanced `tail` yet — help it along and retry.
                let _ = self.tail.compare_exchange(t, t.wrapping_add(1), Ordering::SeqCst, Ordering::SeqCst);
                self.record(Metrics::record_helper_cas);
                backoff.spin();
                continue;
            }

            if current.cycle.wrapping_add(1) != cyc_t {
                // Slot is still occupied by a stale lap a consumer hasn't
                // drained yet; nothing to do but wait for it to catch up.
                backoff.spin();
                continue;
            }

            let new_entry = Entry { cycle: cyc_t, payload: val };
            match cell.compare_exchange(current, new_entry, Ordering::SeqCst, Ordering::SeqCst) {
                Ok(()) => {
                    debug_assert_cycle_non_decreasing!(current.cycle, new_entry.cycle);
                    let _ = self.tail.compare_exchange(t, t.wrapping_add(1), Ordering::SeqCst, Ordering::SeqCst);
                    self.record(Metrics::record_enqueue);
                    return true;
                }
                Err(_) => {
                    self.record(Metrics::record_retry);
                    backoff.spin();
                    continue;
                }
            }
        }
    }

    /// Dequeues a payload, returning `None` if the ring is empty.
    pub fn dequeue(&self) -> Option<u32> {
        let mut backoff = Backoff::new();
        loop {
            let h = self.head.load(Ordering::SeqCst);
            let cell = self.slot(h);
            let cyc_h = self.cycle(h);
            let current = cell.load(Ordering::SeqCst);

            if current.cycle == cyc_h {
                match self.head.compare_exchange(h, h.wrapping_add(1), Ordering::SeqCst, Ordering::SeqCst) {
                    Ok(()) => {
                        self.record(Metrics::record_dequeue);
                        return Some(current.payload);
                    }
                    Err(_) => {
                        self.record(Metrics::record_retry);
                        backoff.spin();
                        continue;
                    }
                }
            }

            if current.cycle.wrapping_add(1) == cyc_h {
                self.record(Metrics::record_empty_rejection);
                return None;
            }

            backoff.spin();
        }
    }
}

// SAFETY: all mutation goes through `AtomicU64` compare-exchange; no
// interior mutability escapes without going through the cell.
unsafe impl Send for Ring {}
unsafe impl Sync for Ring {}
