//! Fluent builder for constructing a [`Sim`].

use std::sync::Arc;

use eco_agent::{Agent, IdleTick, Observer, PhaseTrace, TickFunction};
use eco_core::{AgentId, AgentRng, RandomSource, SimConfig};
use eco_world::SharedWorld;

use crate::{Sim, SimError, SimResult};

type Source = Box<dyn RandomSource + Send>;

/// Fluent builder for [`Sim<O>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — team size, horizon, seed, barrier kind, …
/// - [`SharedWorld`] — fields declared, no owners assigned yet
/// - `O: Observer` — the watcher's reporting collaborator
///
/// # Team
///
/// | Method                     | Adds                                          |
/// |----------------------------|-----------------------------------------------|
/// | `.agent(t)`                | worker with id = number of workers so far     |
/// | `.agent_with_source(t, r)` | same, with a caller-supplied random source    |
/// | `.watcher_tick(t)`         | tick function for the watcher (default idle)  |
///
/// The watcher is always the last member: with `k` workers it is
/// `AgentId(k)` and the team has `k + 1` members, which must equal
/// `config.team_size`.
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimBuilder::new(config, world, LogObserver::new())
///     .agent(RyeGrass::new(height, temp, precip, rabbits, params.clone()))
///     .agent(Rabbits::new(rabbits, height, None))
///     .build()?;
/// let report = sim.run()?;
/// ```
pub struct SimBuilder<O: Observer> {
    config:       SimConfig,
    world:        SharedWorld,
    observer:     O,
    workers:      Vec<(Box<dyn TickFunction>, Option<Source>)>,
    watcher_tick: Box<dyn TickFunction>,
}

impl<O: Observer> SimBuilder<O> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, world: SharedWorld, observer: O) -> Self {
        Self {
            config,
            world,
            observer,
            workers:      Vec::new(),
            watcher_tick: Box::new(IdleTick),
        }
    }

    /// Register a worker.
    pub fn agent<T: TickFunction>(self, tick: T) -> Self {
        self.boxed_agent(Box::new(tick))
    }

    /// Register an already-boxed worker.
    pub fn boxed_agent(mut self, tick: Box<dyn TickFunction>) -> Self {
        self.workers.push((tick, None));
        self
    }

    /// Register a worker that draws from `source` instead of the seeded
    /// per-agent RNG.
    pub fn agent_with_source<T, R>(mut self, tick: T, source: R) -> Self
    where
        T: TickFunction,
        R: RandomSource + Send + 'static,
    {
        self.workers.push((Box::new(tick), Some(Box::new(source))));
        self
    }

    /// Give the watcher a tick function of its own.  Needed for a team of
    /// one, where the watcher is the only member.
    pub fn watcher_tick<T: TickFunction>(mut self, tick: T) -> Self {
        self.watcher_tick = Box::new(tick);
        self
    }

    /// Number of members registered so far, watcher included.
    pub fn team_len(&self) -> usize {
        self.workers.len() + 1
    }

    /// Validate the team, assign commit ownership, build the barrier, and
    /// return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<O>> {
        self.config.validate()?;

        let team_size = self.team_len();
        if team_size != self.config.team_size {
            return Err(SimError::TeamSizeMismatch {
                expected: self.config.team_size,
                got:      team_size,
            });
        }

        let mut world = self.world;
        let seed = self.config.seed;

        // ── Claim fields: one owner each, rejected on overlap ─────────────
        let mut agents = Vec::with_capacity(self.workers.len());
        for (i, (tick, source)) in self.workers.into_iter().enumerate() {
            let id = AgentId(i as u32);
            for field in tick.writes() {
                world.assign_owner(field, id)?;
            }
            let source: Source = match source {
                Some(s) => s,
                None    => Box::new(AgentRng::new(seed, id)),
            };
            agents.push(Agent::new(id, tick, source));
        }

        let watcher_id = AgentId(agents.len() as u32);
        for field in self.watcher_tick.writes() {
            world.assign_owner(field, watcher_id)?;
        }
        world.assign_clock(watcher_id)?;
        let watcher = Agent::new(
            watcher_id,
            self.watcher_tick,
            Box::new(AgentRng::new(seed, watcher_id)),
        );

        let barrier = eco_barrier::build(self.config.barrier, team_size)?;
        let trace = self
            .config
            .trace_phases
            .then(|| Arc::new(PhaseTrace::new(team_size)));

        Ok(Sim {
            config:   self.config,
            world:    Arc::new(world),
            barrier,
            agents,
            watcher,
            observer: self.observer,
            trace,
        })
    }
}
