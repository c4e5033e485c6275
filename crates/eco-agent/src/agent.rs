//! The per-tick loop every team member runs.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use eco_barrier::Rendezvous;
use eco_core::{AgentId, Month, RandomSource};
use eco_world::{SharedWorld, WorldError, WorldSnapshot};

use crate::{Crossing, Observer, Phase, PhaseCounts, PhaseTrace, TickContext, TickFunction};

/// Handles every member of one team shares.
#[derive(Clone)]
pub struct TeamBinding {
    pub world:   Arc<SharedWorld>,
    pub barrier: Arc<dyn Rendezvous>,
    /// The loop runs while `world.month() < horizon`.
    pub horizon: Month,
    pub trace:   Option<Arc<PhaseTrace>>,
}

/// What a member reports after leaving its loop.
#[derive(Debug)]
pub struct AgentReport {
    pub id:     AgentId,
    pub name:   String,
    pub counts: PhaseCounts,
    pub phase:  Phase,
    /// First write the world refused.  The loop kept its barrier cadence
    /// regardless, so the rest of the team was unaffected.
    pub violation: Option<WorldError>,
    /// Month in which the tick function panicked.  From then on the member
    /// computed nothing but still crossed every barrier.
    pub panicked: Option<Month>,
}

/// Extra output of the watcher's loop.
pub struct WatchReport<O> {
    pub agent:    AgentReport,
    pub observer: O,
    /// One snapshot per tick, taken after the assign barrier.
    pub history:  Vec<WorldSnapshot>,
}

/// One team member: an id (= its barrier slot), a tick function, and its
/// private random source.
pub struct Agent {
    id:    AgentId,
    tick:  Box<dyn TickFunction>,
    rng:   Box<dyn RandomSource + Send>,
    phase: Phase,
}

impl Agent {
    pub fn new(
        id:   AgentId,
        tick: Box<dyn TickFunction>,
        rng:  Box<dyn RandomSource + Send>,
    ) -> Self {
        Self { id, tick, rng, phase: Phase::Computing }
    }

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn tick_function(&self) -> &dyn TickFunction {
        self.tick.as_ref()
    }

    /// Run as an ordinary member until the horizon.
    pub fn run(self, team: &TeamBinding) -> AgentReport {
        let mut no_watch: Option<Watch<'_>> = None;
        self.run_loop(team, &mut no_watch)
    }

    /// Run as the watcher: same loop, plus reporting and advancing the
    /// month during every observation phase.
    pub fn run_watching<O: Observer>(self, team: &TeamBinding, mut observer: O) -> WatchReport<O> {
        let mut history = Vec::new();
        let agent = {
            let mut watch = Some(Watch { observer: &mut observer, history: &mut history });
            self.run_loop(team, &mut watch)
        };
        observer.on_sim_end(team.world.month());
        WatchReport { agent, observer, history }
    }

    fn run_loop(mut self, team: &TeamBinding, watch: &mut Option<Watch<'_>>) -> AgentReport {
        let world = team.world.as_ref();
        let mut counts = PhaseCounts::default();
        let mut violation: Option<WorldError> = None;
        let mut panicked: Option<Month> = None;

        while world.month() < team.horizon {
            // ── ① Compute ─────────────────────────────────────────────────
            self.phase = Phase::Computing;
            let snapshot = world.snapshot();
            let month = snapshot.month();
            let next = if panicked.is_some() {
                Vec::new()
            } else {
                let ctx = TickContext::new(self.id, &snapshot);
                let tick = self.tick.as_ref();
                let rng = self.rng.as_mut();
                match panic::catch_unwind(AssertUnwindSafe(|| tick.compute(&ctx, rng))) {
                    Ok(writes) => writes,
                    Err(_) => {
                        panicked = Some(month);
                        Vec::new()
                    }
                }
            };
            self.cross(team, month, &mut counts);

            // ── ② Commit ──────────────────────────────────────────────────
            for write in next {
                if let Err(e) = world.commit(self.id, write) {
                    violation.get_or_insert(e);
                }
            }
            self.cross(team, month, &mut counts);

            // ── ③ Observe ─────────────────────────────────────────────────
            if let Some(w) = watch.as_mut() {
                let committed = world.snapshot();
                w.observer.on_month(&committed);
                w.history.push(committed);
                if let Err(e) = world.advance_month(self.id) {
                    violation.get_or_insert(e);
                }
            }
            self.cross(team, month, &mut counts);
        }

        self.phase = Phase::Terminated;
        AgentReport {
            id: self.id,
            name: self.tick.name().to_owned(),
            counts,
            phase: self.phase,
            violation,
            panicked,
        }
    }

    /// Finish the current phase: count it, trace it, wait for the team, and
    /// step to the next phase.
    fn cross(&mut self, team: &TeamBinding, month: Month, counts: &mut PhaseCounts) {
        counts.bump(self.phase);
        if let Some(trace) = &team.trace {
            trace.record(self.id, Crossing { month, phase: self.phase });
        }
        team.barrier.wait();
        self.phase = self.phase.next();
    }
}

struct Watch<'a> {
    observer: &'a mut dyn Observer,
    history:  &'a mut Vec<WorldSnapshot>,
}
