//! Blocking barrier: the spin barrier's protocol on a condition variable.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use crate::{BarrierError, BarrierResult, BarrierStats, Rendezvous, WaitRole};

#[derive(Default)]
struct State {
    arrived:    usize,
    departed:   usize,
    /// Set by the releaser while it waits for departures.  New arrivals
    /// block until it clears.
    draining:   bool,
    /// Bumped on every release; members wait for it to change.
    generation: u64,
}

/// A reusable barrier whose waiters sleep instead of spinning.
///
/// Keeps the release/confirm structure of [`PhaseBarrier`][crate::PhaseBarrier]:
/// the last arrival resets the counters, then waits until the other
/// `N − 1` members have departed before anyone may enter the next round.
pub struct CondvarBarrier {
    team_size:   usize,
    state:       Mutex<State>,
    cvar:        Condvar,
    rounds:      AtomicU64,
    max_arrived: AtomicUsize,
}

impl CondvarBarrier {
    pub fn new(team_size: usize) -> BarrierResult<Self> {
        if team_size == 0 {
            return Err(BarrierError::EmptyTeam);
        }
        Ok(Self {
            team_size,
            state:       Mutex::new(State::default()),
            cvar:        Condvar::new(),
            rounds:      AtomicU64::new(0),
            max_arrived: AtomicUsize::new(0),
        })
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn sleep<'a>(&self, guard: MutexGuard<'a, State>) -> MutexGuard<'a, State> {
        self.cvar.wait(guard).unwrap_or_else(PoisonError::into_inner)
    }
}

impl Rendezvous for CondvarBarrier {
    fn team_size(&self) -> usize {
        self.team_size
    }

    fn wait(&self) -> WaitRole {
        let mut st = self.lock();
        while st.draining {
            st = self.sleep(st);
        }

        st.arrived += 1;
        self.max_arrived.fetch_max(st.arrived, Ordering::Relaxed);

        if st.arrived == self.team_size {
            st.arrived = 0;
            st.departed = 0;
            st.generation = st.generation.wrapping_add(1);
            self.rounds.fetch_add(1, Ordering::Relaxed);
            if self.team_size > 1 {
                st.draining = true;
                self.cvar.notify_all();
                while st.departed != self.team_size - 1 {
                    st = self.sleep(st);
                }
                st.draining = false;
                self.cvar.notify_all();
            }
            return WaitRole::Releaser;
        }

        let generation = st.generation;
        while st.generation == generation {
            st = self.sleep(st);
        }
        st.departed += 1;
        if st.departed == self.team_size - 1 {
            self.cvar.notify_all();
        }
        WaitRole::Member
    }

    fn stats(&self) -> BarrierStats {
        let arrived = self.lock().arrived;
        BarrierStats {
            team_size:   self.team_size,
            rounds:      self.rounds.load(Ordering::Acquire),
            arrived,
            max_arrived: self.max_arrived.load(Ordering::Relaxed),
        }
    }
}
