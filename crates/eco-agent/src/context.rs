//! Read-only input handed to every tick function.

use eco_core::{AgentId, Month};
use eco_world::WorldSnapshot;

/// What a [`TickFunction`][crate::TickFunction] may look at.
///
/// Built once per agent per tick from that agent's own snapshot.  Nothing in
/// here changes while the compute phase runs, whatever the other members
/// commit afterwards.
pub struct TickContext<'a> {
    /// The member being asked for its next values.
    pub agent: AgentId,

    /// The world as committed by the previous tick.
    pub snapshot: &'a WorldSnapshot,
}

impl<'a> TickContext<'a> {
    #[inline]
    pub fn new(agent: AgentId, snapshot: &'a WorldSnapshot) -> Self {
        Self { agent, snapshot }
    }

    /// Month being computed.
    #[inline]
    pub fn month(&self) -> Month {
        self.snapshot.month()
    }
}
