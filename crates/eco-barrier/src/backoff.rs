//! Spin-then-yield waiting for the spin barrier.

use std::hint;
use std::thread;

/// Doublings of `spin_loop` hints before the waiter starts yielding.
const SPIN_LIMIT: u32 = 6;

/// Exponential spin backoff.
///
/// Spins with CPU relax hints for the first few calls, then yields the
/// thread on every call so an oversubscribed team (more members than cores)
/// still lets the member being waited on run.
#[derive(Debug, Default)]
pub struct Backoff {
    step: u32,
}

impl Backoff {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    /// Wait a little before re-checking the condition.
    #[inline]
    pub fn snooze(&mut self) {
        if self.step <= SPIN_LIMIT {
            for _ in 0..(1u32 << self.step) {
                hint::spin_loop();
            }
            self.step += 1;
        } else {
            thread::yield_now();
        }
    }

    /// `true` once the backoff has moved from spinning to yielding.
    pub fn is_yielding(&self) -> bool {
        self.step > SPIN_LIMIT
    }
}
