//! The `Rendezvous` trait shared by every barrier implementation.

/// What a caller of [`Rendezvous::wait`] was in the round it just left.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WaitRole {
    /// The last arrival.  It reset the counters and released the others.
    Releaser,
    /// Any other member.
    Member,
}

impl WaitRole {
    #[inline]
    pub fn is_releaser(self) -> bool {
        self == WaitRole::Releaser
    }
}

/// Instrumentation counters, readable at any time without joining the round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct BarrierStats {
    pub team_size:   usize,
    /// Rounds released.  Counted at the release, so a member that has left
    /// a round always sees it included.
    pub rounds:      u64,
    /// Members currently waiting in the open round.
    pub arrived:     usize,
    /// Highest arrived count ever observed.  Never exceeds `team_size`.
    pub max_arrived: usize,
}

/// A reusable barrier for a fixed team.
///
/// `wait` blocks until all `team_size` members have called it for the
/// current round, then returns to all of them.  Exactly one caller per
/// round gets [`WaitRole::Releaser`].
pub trait Rendezvous: Send + Sync {
    fn team_size(&self) -> usize;

    fn wait(&self) -> WaitRole;

    fn stats(&self) -> BarrierStats;
}
