//! Explicit per-agent phase state and the optional crossing trace.

use std::sync::{Mutex, PoisonError};

use eco_core::{AgentId, Month};

use crate::{AgentError, AgentResult};

/// Where an agent is within its tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Reading its snapshot and building next values.
    Computing,
    /// Writing next values into the fields it owns.
    Committing,
    /// Watcher: reporting and advancing time.  Others: idle.
    Observing,
    /// Left the loop after seeing the horizon.
    Terminated,
}

impl Phase {
    /// The phase entered after the barrier that ends `self`.
    pub fn next(self) -> Phase {
        match self {
            Phase::Computing  => Phase::Committing,
            Phase::Committing => Phase::Observing,
            Phase::Observing  => Phase::Computing,
            Phase::Terminated => Phase::Terminated,
        }
    }
}

/// How many times an agent has finished each phase.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PhaseCounts {
    pub compute: u64,
    pub commit:  u64,
    pub observe: u64,
}

impl PhaseCounts {
    pub(crate) fn bump(&mut self, phase: Phase) {
        match phase {
            Phase::Computing  => self.compute += 1,
            Phase::Committing => self.commit += 1,
            Phase::Observing  => self.observe += 1,
            Phase::Terminated => {}
        }
    }

    /// Barrier calls made so far: one per finished phase.
    pub fn waits(&self) -> u64 {
        self.compute + self.commit + self.observe
    }
}

/// One barrier crossing: the phase an agent was leaving and the month it
/// believed it was in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Crossing {
    pub month: Month,
    pub phase: Phase,
}

/// Per-agent record of every barrier crossing.
///
/// Each agent appends only to its own lane, so the lane locks are never
/// contended during the run.  After the run every lane must be identical;
/// [`check_alignment`][Self::check_alignment] verifies that.
pub struct PhaseTrace {
    lanes: Vec<Mutex<Vec<Crossing>>>,
}

impl PhaseTrace {
    pub fn new(team_size: usize) -> Self {
        Self {
            lanes: (0..team_size).map(|_| Mutex::new(Vec::new())).collect(),
        }
    }

    pub fn team_size(&self) -> usize {
        self.lanes.len()
    }

    pub fn record(&self, agent: AgentId, crossing: Crossing) {
        if let Some(lane) = self.lanes.get(agent.index()) {
            lane.lock().unwrap_or_else(PoisonError::into_inner).push(crossing);
        }
    }

    /// Copy of one agent's crossings.
    pub fn lane(&self, agent: AgentId) -> Vec<Crossing> {
        self.lanes
            .get(agent.index())
            .map(|l| l.lock().unwrap_or_else(PoisonError::into_inner).clone())
            .unwrap_or_default()
    }

    /// Check that every agent crossed the same barriers in the same phase
    /// and month.  Returns the number of crossings per agent.
    pub fn check_alignment(&self) -> AgentResult<usize> {
        let reference = self.lane(AgentId(0));
        for i in 1..self.lanes.len() {
            let agent = AgentId(i as u32);
            let lane = self.lane(agent);
            let len = reference.len().max(lane.len());
            for index in 0..len {
                let expected = reference.get(index).copied();
                let got = lane.get(index).copied();
                if expected != got {
                    return Err(AgentError::Misaligned {
                        agent,
                        reference: AgentId(0),
                        index,
                        expected,
                        got,
                    });
                }
            }
        }
        Ok(reference.len())
    }
}
