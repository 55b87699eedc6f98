use thiserror::Error;

/// Failure modes for [`crate::ring::Ring::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RingError {
    /// `capacity` was zero, or not a multiple of the cache-remap stripe width
    /// (`entries_per_line` cells per cache line).
    #[error("invalid ring capacity {capacity}: must be a non-zero multiple of {entries_per_line}")]
    InvalidCapacity {
        capacity: usize,
        entries_per_line: usize,
    },
    /// The backing cell buffer could not be allocated.
    #[error("allocation failure for ring of capacity {capacity}")]
    AllocationFailure { capacity: usize },
}

/// Failure modes for [`crate::scq::Scq::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScqError {
    /// `capacity` exceeded the reference ceiling of 64, or was not exactly 64.
    ///
    /// This crate never silently substitutes a different capacity for the
    /// one requested; callers asking for anything but 64 get this error back.
    #[error("unsupported SCQ capacity {requested}: reference implementation requires exactly {required}")]
    UnsupportedCapacity { requested: usize, required: usize },
    /// One of the two backing rings, or the `data` pointer table, failed to allocate.
    #[error("allocation failure constructing SCQ of capacity {capacity}")]
    AllocationFailure { capacity: usize },
}

impl From<RingError> for ScqError {
    fn from(e: RingError) -> Self {
        match e {
            RingError::InvalidCapacity { capacity, .. } | RingError::AllocationFailure { capacity } => {
                ScqError::AllocationFailure { capacity }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_error_messages_are_stable() {
        let e = RingError::InvalidCapacity { capacity: 10, entries_per_line: 8 };
        assert_eq!(
            e.to_string(),
            "invalid ring capacity 10: must be a non-zero multiple of 8"
        );
    }

    #[test]
    fn scq_error_messages_are_stable() {
        let e = ScqError::UnsupportedCapacity { requested: 32, required: 64 };
        assert_eq!(
            e.to_string(),
            "unsupported SCQ capacity 32: reference implementation requires exactly 64"
        );
    }
}
