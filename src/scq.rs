//! A scalable circular queue: a bounded MPMC queue of pointers built from
//! two [`Ring`]s and a side table instead of one ring of payloads directly.
//!
//! A 32-bit [`Ring`] can only carry a 32-bit payload, so it cannot hold a
//! pointer. `Scq<T>` works around this by never putting pointers in a ring
//! at all — it keeps the actual `*mut T` values in a plain `data` array
//! indexed by slot, and uses two rings purely to hand out and reclaim slot
//! *indices*:
//!
//! - `fq` ("free queue") holds indices of slots whose `data` entry is free
//!   to overwrite.
//! - `aq` ("allocated queue") holds indices of slots whose `data` entry
//!   currently holds a live item, in the order they were published.
//!
//! At every quiescent point exactly one of `fq`/`aq` contains each index —
//! that single-ownership handoff is what makes the non-atomic `data[idx]`
//! read/write race-free: whichever ring currently holds `idx` also holds the
//! only reference to it, so only one thread at a time can be touching that
//! slot.

use std::cell::UnsafeCell;
use std::marker::PhantomData;
use std::ptr;

use crate::config::SCQ_CAPACITY;
use crate::error::ScqError;
use crate::invariants::debug_assert_slot_conservation;
use crate::ring::Ring;

/// A bounded lock-free MPMC queue of `*mut T`, built on the reference design's
/// pair of 32-bit rings plus a side pointer table.
///
/// Fixed at [`SCQ_CAPACITY`] (64) slots, matching the reference
/// implementation's `NUM_ENTRIES` ceiling — see [`Scq::new`].
pub struct Scq<T> {
    fq: Ring,
    aq: Ring,
    data: Box<[UnsafeCell<*mut T>]>,
    _marker: PhantomData<T>,
}

impl<T> Scq<T> {
    /// Builds an SCQ of `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns [`ScqError::UnsupportedCapacity`] unless `capacity` is
    /// exactly [`SCQ_CAPACITY`]. The two-ring composition relies on
    /// `fq`/`aq` conserving every index between them, which this crate
    /// only constructs for the one capacity the reference design supports;
    /// it never silently substitutes a different one.
    pub fn new(capacity: usize) -> Result<Self, ScqError> {
        if capacity != SCQ_CAPACITY {
            return Err(ScqError::UnsupportedCapacity { requested: capacity, required: SCQ_CAPACITY });
        }

        // `aq` starts empty: nothing has been published yet.
        let aq = Ring::new(capacity, false)?;

        // `fq` starts holding every index 0..capacity, built by explicit
        // enqueues rather than the ring's zero-payload "full" shortcut —
        // the shortcut's zeroed cells would hand out index 0 for every
        // slot instead of one distinct index per slot.
        let fq = Ring::new(capacity, false)?;
        for idx in 0..capacity as u32 {
            fq.enqueue(idx);
        }

        let data: Box<[UnsafeCell<*mut T>]> = (0..capacity).map(|_| UnsafeCell::new(ptr::null_mut())).collect();

        debug_assert_slot_conservation!(fq.len(), aq.len(), capacity);

        Ok(Self { fq, aq, data, _marker: PhantomData })
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.aq.capacity()
    }

    /// Snapshot length (number of allocated, unread slots). See
    /// [`Ring::len`] for the same non-linearizable caveat.
    #[must_use]
    pub fn len(&self) -> usize {
        self.aq.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aq.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.fq.is_empty()
    }

    /// Publishes `ptr`, returning `false` if every slot is currently occupied.
    ///
    /// Never blocks: a full queue is detected by `fq` itself reporting empty,
    /// not by spinning on it.
    pub fn enqueue(&self, ptr: *mut T) -> bool {
        let Some(idx) = self.fq.dequeue() else {
            return false;
        };

        // SAFETY: this thread alone holds `idx` — it just took sole
        // ownership of it by dequeuing from `fq`, and no other thread can
        // observe `idx` until the `aq.enqueue` below publishes it.
        unsafe {
            *self.data[idx as usize].get() = ptr;
        }

        // `fq` just gave up one index, so `aq` has at most `capacity - 1`
        // entries before this enqueue — it cannot be full.
        self.aq.enqueue(idx);
        true
    }

    /// Takes the oldest published pointer, or `None` if the queue is empty.
    pub fn dequeue(&self) -> Option<*mut T> {
        let idx = self.aq.dequeue()?;

        // SAFETY: symmetric with `enqueue` — this thread alone holds `idx`
        // between the `aq.dequeue` above and the `fq.enqueue` below.
        let ptr = unsafe { *self.data[idx as usize].get() };

        // `aq` just gave up one index, so `fq` cannot be full either.
        self.fq.enqueue(idx);
        Some(ptr)
    }
}

// SAFETY: `Scq<T>` only ever moves `*mut T` values between threads via the
// slot-ownership handoff above; it never dereferences them itself. Requiring
// `T: Send` matches handing a `*mut T` across a thread boundary.
unsafe impl<T: Send> Send for Scq<T> {}
unsafe impl<T: Send> Sync for Scq<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn rejects_any_capacity_other_than_64() {
        assert!(matches!(Scq::<u32>::new(32), Err(ScqError::UnsupportedCapacity { requested: 32, required: 64 })));
        assert!(Scq::<u32>::new(64).is_ok());
    }

    #[test]
    fn starts_empty() {
        let scq: Scq<u32> = Scq::new(64).unwrap();
        assert!(scq.is_empty());
        assert!(!scq.is_full());
        assert_eq!(scq.dequeue(), None);
    }

    #[test]
    fn single_threaded_fifo_roundtrip() {
        let scq: Scq<u32> = Scq::new(64).unwrap();
        let mut boxed: Vec<Box<u32>> = (0..64).map(Box::new).collect();
        let ptrs: Vec<*mut u32> = boxed.iter_mut().map(|b| &mut **b as *mut u32).collect();

        for &p in &ptrs {
            assert!(scq.enqueue(p));
        }
        assert!(scq.is_full());
        assert!(!scq.enqueue(ptr::null_mut()));

        for &expected in &ptrs {
            let got = scq.dequeue().unwrap();
            assert_eq!(got, expected);
        }
        assert!(scq.is_empty());
    }

    #[test]
    fn concurrent_producers_and_consumers_conserve_every_item() {
        let scq: Arc<Scq<AtomicUsize>> = Arc::new(Scq::new(64).unwrap());
        let per_producer = 500usize;
        let producers = 4usize;
        let total = per_producer * producers;

        let boxes: Vec<Box<AtomicUsize>> =
            (0..total).map(|i| Box::new(AtomicUsize::new(i))).collect();
        let ptrs: Vec<*mut AtomicUsize> = boxes.iter().map(|b| &**b as *const _ as *mut AtomicUsize).collect();

        let handles: Vec<_> = (0..producers)
            .map(|p| {
                let scq = Arc::clone(&scq);
                let ptrs = ptrs[p * per_producer..(p + 1) * per_producer].to_vec();
                thread::spawn(move || {
                    for ptr in ptrs {
                        loop {
                            if scq.enqueue(ptr) {
                                break;
                            }
                            thread::yield_now();
                        }
                    }
                })
            })
            .collect();

        let consumer_scq = Arc::clone(&scq);
        let consumer = thread::spawn(move || {
            let mut received = Vec::with_capacity(total);
            while received.len() < total {
                if let Some(ptr) = consumer_scq.dequeue() {
                    let val = unsafe { (*ptr).load(Ordering::SeqCst) };
                    received.push(val);
                } else {
                    thread::yield_now();
                }
            }
            received
        });

        for h in handles {
            h.join().unwrap();
        }
        let mut received = consumer.join().unwrap();
        received.sort_unstable();

        let expected: Vec<usize> = (0..total).collect();
        assert_eq!(received, expected);
        assert!(scq.is_empty());

        drop(boxes);
    }
}
