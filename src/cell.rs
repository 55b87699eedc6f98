//! The ring's atomic cell: a `(cycle, payload)` pair packed into one 64-bit word.
//!
//! Packing both fields into a single `AtomicU64` (rather than two independent
//! atomics) is what makes the enqueue/dequeue state machines in [`crate::ring`]
//! a single CAS instruction instead of a compound read-modify-write across two
//! locations.

use std::sync::atomic::{AtomicU64, Ordering};

/// Logical contents of a ring cell: a lap counter and the 32-bit payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub cycle: u32,
    pub payload: u32,
}

impl Entry {
    #[inline]
    const fn pack(self) -> u64 {
        (self.cycle as u64) << 32 | self.payload as u64
    }

    #[inline]
    const fn unpack(word: u64) -> Self {
        Self {
            cycle: (word >> 32) as u32,
            payload: word as u32,
        }
    }
}

/// One atomic slot in the ring: `AtomicU64` read/written as an [`Entry`].
#[repr(transparent)]
pub struct Cell(AtomicU64);

impl Cell {
    #[inline]
    pub const fn new(entry: Entry) -> Self {
        Self(AtomicU64::new(entry.pack()))
    }

    #[inline]
    pub const fn zeroed() -> Self {
        Self(AtomicU64::new(0))
    }

    #[inline]
    pub fn load(&self, order: Ordering) -> Entry {
        Entry::unpack(self.0.load(order))
    }

    /// Attempts to replace `current` with `new`. Returns `Ok(())` on success,
    /// `Err(observed)` with the cell's current contents on failure.
    #[inline]
    pub fn compare_exchange(
        &self,
        current: Entry,
        new: Entry,
        success: Ordering,
        failure: Ordering,
    ) -> Result<(), Entry> {
        self.0
            .compare_exchange(current.pack(), new.pack(), success, failure)
            .map(|_| ())
            .map_err(Entry::unpack)
    }
}
