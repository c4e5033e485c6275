//! What a finished run hands back.

use std::sync::Arc;

use eco_agent::{AgentReport, PhaseTrace};
use eco_barrier::BarrierStats;
use eco_core::{AgentId, Month};
use eco_world::WorldSnapshot;

/// Result of [`Sim::run`][crate::Sim::run].
pub struct SimReport<O> {
    /// Month counter when the team stopped.  Equals the horizon.
    pub final_month: Month,

    /// Barrier counters after the join: `rounds` is three per tick.
    pub barrier: BarrierStats,

    /// One report per member in id order; the watcher is last.
    pub agents: Vec<AgentReport>,

    /// World as committed by each tick, taken by the watcher after the
    /// assign barrier.
    pub history: Vec<WorldSnapshot>,

    /// World after the last tick.
    pub final_snapshot: WorldSnapshot,

    /// The watcher's observer, returned to the caller.
    pub observer: O,

    /// Crossing trace, when `trace_phases` was set.
    pub trace: Option<Arc<PhaseTrace>>,
}

impl<O> SimReport<O> {
    /// Ticks executed.
    pub fn ticks(&self) -> usize {
        self.history.len()
    }

    pub fn agent(&self, id: AgentId) -> Option<&AgentReport> {
        self.agents.get(id.index())
    }

    pub fn watcher(&self) -> Option<&AgentReport> {
        self.agents.last()
    }
}
