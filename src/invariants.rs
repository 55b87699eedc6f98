//! Debug assertion macros for ring/SCQ invariants.
//!
//! These macros provide runtime checks for the invariants the lock-free
//! protocol depends on. They are only active in debug builds
//! (`#[cfg(debug_assertions)]`), so there is zero overhead in release builds.
//! Because the underlying state is read non-atomically for the check, these
//! are best-effort bug detectors under concurrency, not linearizable
//! assertions — the same tradeoff the snapshot `len()` reads elsewhere in
//! this crate make.

// =============================================================================
// I1: Cycle monotonicity per physical cell
// =============================================================================

/// Assert that a cell's cycle does not regress across a successful CAS.
///
/// **Invariant**: `new_cycle >= old_cycle`
///
/// Used in: `Ring::enqueue` after a winning `compare_exchange`.
macro_rules! debug_assert_cycle_non_decreasing {
    ($old:expr, $new:expr) => {
        debug_assert!(
            $new >= $old,
            "I1 violated: cell cycle decreased from {} to {}",
            $old,
            $new
        )
    };
}

// =============================================================================
// I3: Bounded count (no overfill)
// =============================================================================

/// Assert that a head/tail snapshot does not show more than `capacity` items in flight.
///
/// **Invariant**: `tail - head <= capacity`
///
/// Used in: `Ring::len` and test helpers; a non-atomic snapshot, so this is a
/// bug-catching aid, not a runtime guarantee under concurrency.
macro_rules! debug_assert_bounded_count {
    ($count:expr, $capacity:expr) => {
        debug_assert!(
            $count <= $capacity,
            "I3 violated: count {} exceeds capacity {}",
            $count,
            $capacity
        )
    };
}

// =============================================================================
// SCQ slot conservation
// =============================================================================

/// Assert that `|fq| + |aq| == capacity` at a quiescent point.
///
/// Used in: `Scq` tests between operations, never inside the hot path (the
/// sum is only meaningful when no thread is mid-operation).
macro_rules! debug_assert_slot_conservation {
    ($fq_len:expr, $aq_len:expr, $capacity:expr) => {
        debug_assert!(
            $fq_len + $aq_len == $capacity,
            "SCQ slot conservation violated: |fq|={} + |aq|={} != capacity={}",
            $fq_len,
            $aq_len,
            $capacity
        )
    };
}

pub(crate) use debug_assert_bounded_count;
pub(crate) use debug_assert_cycle_non_decreasing;
pub(crate) use debug_assert_slot_conservation;
