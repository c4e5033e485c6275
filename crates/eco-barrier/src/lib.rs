//! `eco-barrier` — reusable rendezvous for a fixed-size team of threads.
//!
//! # Protocol
//!
//! ```text
//! wait():
//!   ① under the guard: arrived += 1
//!   ② arrived == N  → releaser: arrived = 0, departed = 0, then wait until
//!                     departed == N − 1 before giving up the guard
//!   ③ arrived <  N  → member:  drop the guard, wait until arrived == 0,
//!                     then departed += 1
//! ```
//!
//! The releaser keeps the guard until every other member has confirmed its
//! departure.  A member that leaves early and immediately calls `wait()`
//! again therefore blocks on the guard instead of bumping `arrived` while a
//! slower member is still waiting to observe the reset.  No member can lap
//! another, and the round count stays exact.
//!
//! # Liveness
//!
//! A barrier is fatal-only.  If any member never calls `wait()` (it crashed,
//! deadlocked, or left its loop without the rest of the team), every other
//! member blocks forever.  There is no timeout and no retry; a supervising
//! driver may watch [`BarrierStats::rounds`] and give up on the whole team.
//!
//! | Type               | Waiting strategy                                  |
//! |--------------------|---------------------------------------------------|
//! | [`PhaseBarrier`]   | mutex guard + spin-waits with [`Backoff`]          |
//! | [`CondvarBarrier`] | mutex + condition variable, same three steps       |

pub mod backoff;
pub mod condvar;
pub mod error;
pub mod rendezvous;
pub mod spin;


use std::sync::Arc;

use eco_core::BarrierKind;

pub use backoff::Backoff;
pub use condvar::CondvarBarrier;
pub use error::{BarrierError, BarrierResult};
pub use rendezvous::{BarrierStats, Rendezvous, WaitRole};
pub use spin::PhaseBarrier;

/// Build the barrier selected by `kind` for a team of `team_size`.
pub fn build(kind: BarrierKind, team_size: usize) -> BarrierResult<Arc<dyn Rendezvous>> {
    Ok(match kind {
        BarrierKind::Spin    => Arc::new(PhaseBarrier::new(team_size)?),
        BarrierKind::Condvar => Arc::new(CondvarBarrier::new(team_size)?),
    })
}
