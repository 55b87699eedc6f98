/// Cache line width assumed by [`crate::ring::remap`] (bytes).
pub(crate) const CACHE_LINE_BYTES: usize = 64;

/// Size of one ring cell (bytes) — a single `AtomicU64`.
pub(crate) const CELL_BYTES: usize = 8;

/// Cells per cache line at the assumed cache line width.
pub(crate) const ENTRIES_PER_LINE: usize = CACHE_LINE_BYTES / CELL_BYTES;

/// Configuration for a [`crate::ring::Ring`] or [`crate::scq::Scq`].
///
/// Validated at construction: `capacity` must satisfy the cache-remap
/// requirement from the cell encoding (a multiple of [`ENTRIES_PER_LINE`],
/// at least [`ENTRIES_PER_LINE`] itself) or construction returns an error
/// rather than silently falling back to an identity remap.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Ring/SCQ capacity, `N`.
    pub capacity: usize,
    /// Enable the opt-in atomic contention counters in [`crate::metrics`].
    pub enable_metrics: bool,
}

impl Config {
    /// Creates a configuration for the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero, not a multiple of [`ENTRIES_PER_LINE`],
    /// or smaller than [`ENTRIES_PER_LINE`]. Use [`Config::try_new`] for a
    /// non-panicking constructor.
    #[must_use]
    pub const fn new(capacity: usize, enable_metrics: bool) -> Self {
        assert!(capacity >= ENTRIES_PER_LINE, "capacity must be at least ENTRIES_PER_LINE");
        assert!(capacity % ENTRIES_PER_LINE == 0, "capacity must be a multiple of ENTRIES_PER_LINE");
        Self { capacity, enable_metrics }
    }

    /// Non-panicking constructor; `None` if `capacity` fails the remap requirement.
    #[must_use]
    pub const fn try_new(capacity: usize, enable_metrics: bool) -> Option<Self> {
        if capacity < ENTRIES_PER_LINE || capacity % ENTRIES_PER_LINE != 0 {
            return None;
        }
        Some(Self { capacity, enable_metrics })
    }

    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub(crate) const fn lines(&self) -> usize {
        self.capacity / ENTRIES_PER_LINE
    }
}

impl Default for Config {
    /// 64 slots, metrics disabled — matches the capacity [`crate::scq::Scq`] fixes.
    fn default() -> Self {
        Self { capacity: 64, enable_metrics: false }
    }
}

/// The reference capacity `Scq` requires.
pub const SCQ_CAPACITY: usize = 64;
