//! A lock-free bounded MPMC ring buffer and the scalable circular queue (SCQ)
//! built on top of it.
//!
//! [`Ring`] is the low-level building block: a fixed-capacity ring of
//! packed `(cycle, payload)` cells that any number of producer and consumer
//! threads can enqueue/dequeue `u32` values into concurrently, without locks.
//!
//! [`Scq`] composes two [`Ring`]s with a side pointer table to turn that
//! 32-bit-payload primitive into a bounded MPMC queue of pointers, following
//! the free-queue/allocated-queue design from the reference implementation
//! this crate is based on.
//!
//! # Example
//!
//! ```
//! use scq_rs::Ring;
//!
//! let ring = Ring::new(8, false).unwrap();
//! ring.enqueue(42);
//! assert_eq!(ring.dequeue(), Some(42));
//! ```

mod backoff;
mod cell;
mod config;
mod error;
mod invariants;
mod metrics;
mod ring;
mod scq;

pub use backoff::Backoff;
pub use config::{Config, SCQ_CAPACITY};
pub use error::{RingError, ScqError};
pub use metrics::{Metrics, MetricsSnapshot};
pub use ring::Ring;
pub use scq::Scq;
