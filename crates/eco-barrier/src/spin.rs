//! Lock-plus-spin barrier.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::{Backoff, BarrierError, BarrierResult, BarrierStats, Rendezvous, WaitRole};

/// A reusable barrier built from one mutex and two spin conditions.
///
/// The counters are atomics because members poll them outside the guard;
/// every increment of `arrived` still happens under the guard.
pub struct PhaseBarrier {
    team_size:   usize,
    guard:       Mutex<()>,
    arrived:     AtomicUsize,
    departed:    AtomicUsize,
    rounds:      AtomicU64,
    max_arrived: AtomicUsize,
}

impl PhaseBarrier {
    /// Create a barrier for a team of `team_size` members.
    pub fn new(team_size: usize) -> BarrierResult<Self> {
        if team_size == 0 {
            return Err(BarrierError::EmptyTeam);
        }
        Ok(Self {
            team_size,
            guard:       Mutex::new(()),
            arrived:     AtomicUsize::new(0),
            departed:    AtomicUsize::new(0),
            rounds:      AtomicU64::new(0),
            max_arrived: AtomicUsize::new(0),
        })
    }
}

impl Rendezvous for PhaseBarrier {
    fn team_size(&self) -> usize {
        self.team_size
    }

    fn wait(&self) -> WaitRole {
        // The guard protects `()`, so a poisoned lock carries no torn state.
        let guard = self.guard.lock().unwrap_or_else(PoisonError::into_inner);

        let arrived = self.arrived.load(Ordering::Relaxed) + 1;
        self.max_arrived.fetch_max(arrived, Ordering::Relaxed);

        if arrived == self.team_size {
            self.departed.store(0, Ordering::Relaxed);
            // Counted before the release so every departing member sees it.
            self.rounds.fetch_add(1, Ordering::Relaxed);
            // Publishing zero is the release signal.
            self.arrived.store(0, Ordering::Release);

            let mut backoff = Backoff::new();
            while self.departed.load(Ordering::Acquire) != self.team_size - 1 {
                backoff.snooze();
            }
            drop(guard);
            return WaitRole::Releaser;
        }

        self.arrived.store(arrived, Ordering::Release);
        drop(guard);

        let mut backoff = Backoff::new();
        while self.arrived.load(Ordering::Acquire) != 0 {
            backoff.snooze();
        }
        self.departed.fetch_add(1, Ordering::AcqRel);
        WaitRole::Member
    }

    fn stats(&self) -> BarrierStats {
        BarrierStats {
            team_size:   self.team_size,
            rounds:      self.rounds.load(Ordering::Acquire),
            arrived:     self.arrived.load(Ordering::Acquire),
            max_arrived: self.max_arrived.load(Ordering::Relaxed),
        }
    }
}
