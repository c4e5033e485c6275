//! The `Sim` driver: spawn, supervise, join.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use eco_agent::{Agent, AgentReport, Observer, PhaseTrace, TeamBinding, WatchReport};
use eco_barrier::Rendezvous;
use eco_core::{AgentId, SimConfig};
use eco_world::SharedWorld;
use tracing::{debug, warn};

use crate::{SimError, SimReport, SimResult};

/// Longest sleep between two supervision polls.
const MAX_POLL: Duration = Duration::from_millis(10);

/// A validated team, ready to run once.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<O: Observer> {
    /// Run configuration (team size, horizon, seed, …).
    pub config: SimConfig,

    /// Shared state, owners already assigned.
    pub world: Arc<SharedWorld>,

    /// One barrier for the whole team.
    pub barrier: Arc<dyn Rendezvous>,

    pub(crate) agents:   Vec<Agent>,
    pub(crate) watcher:  Agent,
    pub(crate) observer: O,
    pub(crate) trace:    Option<Arc<PhaseTrace>>,
}

impl<O: Observer> Sim<O> {
    pub fn team_size(&self) -> usize {
        self.agents.len() + 1
    }

    /// Id of the member that advances time and reports.
    pub fn watcher_id(&self) -> AgentId {
        self.watcher.id()
    }

    /// Start every member on its own thread and wait for the whole team to
    /// reach the horizon.
    ///
    /// No member runs until every thread has been spawned.  A panic in a
    /// tick function is contained by the agent loop and reported here as
    /// [`SimError::AgentPanicked`] once the team finishes; a panic anywhere
    /// else (e.g. in the observer) is noticed on the next poll and reported
    /// the same way, leaving the rest of the team detached.  Without a
    /// watchdog this blocks forever if a member never arrives at a barrier.
    pub fn run(self) -> SimResult<SimReport<O>> {
        let team = TeamBinding {
            world:   Arc::clone(&self.world),
            barrier: Arc::clone(&self.barrier),
            horizon: self.config.end_month(),
            trace:   self.trace.clone(),
        };
        debug!(
            team_size = self.team_size(),
            horizon = team.horizon.0,
            barrier = ?self.config.barrier,
            "spawning team"
        );

        // ── Spawn behind the start gate ───────────────────────────────────
        let gate = Arc::new(StartGate::new());
        let mut workers: Vec<Slot<AgentReport>> = Vec::with_capacity(self.agents.len());
        for agent in self.agents {
            let id = agent.id();
            let team = team.clone();
            let agent_gate = Arc::clone(&gate);
            let spawned = thread::Builder::new()
                .name(format!("eco-agent-{}", id.0))
                .spawn(move || agent_gate.wait().then(|| agent.run(&team)));
            match spawned {
                Ok(handle) => workers.push(Slot::new(id, handle)),
                Err(e) => {
                    gate.release(false);
                    return Err(SimError::Spawn(e));
                }
            }
        }

        let watcher_id = self.watcher.id();
        let watcher = self.watcher;
        let observer = self.observer;
        let watcher_team = team.clone();
        let watcher_gate = Arc::clone(&gate);
        let spawned = thread::Builder::new()
            .name(format!("eco-watcher-{}", watcher_id.0))
            .spawn(move || {
                watcher_gate
                    .wait()
                    .then(|| watcher.run_watching(&watcher_team, observer))
            });
        let mut watch: Slot<WatchReport<O>> = match spawned {
            Ok(handle) => Slot::new(watcher_id, handle),
            Err(e) => {
                gate.release(false);
                return Err(SimError::Spawn(e));
            }
        };
        gate.release(true);

        // ── Supervise and join ────────────────────────────────────────────
        let timeout = self.config.watchdog_ms.map(Duration::from_millis);
        supervise(&team, timeout, &mut workers, &mut watch)?;

        let mut agents = Vec::with_capacity(workers.len() + 1);
        for slot in workers {
            agents.push(slot.into_report()?);
        }
        let watch = watch.into_report()?;
        agents.push(watch.agent);
        debug!(final_month = team.world.month().0, "team joined");

        // ── Verify ────────────────────────────────────────────────────────
        if let Some(report) = agents.iter().find(|r| r.panicked.is_some()) {
            return Err(SimError::AgentPanicked(report.id));
        }
        for report in &mut agents {
            if let Some(source) = report.violation.take() {
                return Err(SimError::Protocol { agent: report.id, source });
            }
        }
        if let Some(trace) = &self.trace {
            trace.check_alignment()?;
        }

        Ok(SimReport {
            final_month:    team.world.month(),
            barrier:        team.barrier.stats(),
            agents,
            history:        watch.history,
            final_snapshot: team.world.snapshot(),
            observer:       watch.observer,
            trace:          self.trace,
        })
    }
}

// ── Start gate ────────────────────────────────────────────────────────────────

/// Holds every spawned member until the whole team exists.  Released with
/// `false` when a later spawn fails, so the members already spawned exit
/// instead of waiting at a barrier nobody else will reach.
pub(crate) struct StartGate {
    open: Mutex<Option<bool>>,
    cvar: Condvar,
}

impl StartGate {
    pub(crate) fn new() -> Self {
        Self { open: Mutex::new(None), cvar: Condvar::new() }
    }

    /// Block until released; `true` means run.
    pub(crate) fn wait(&self) -> bool {
        let mut open = self.open.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            match *open {
                Some(go) => return go,
                None => open = self.cvar.wait(open).unwrap_or_else(PoisonError::into_inner),
            }
        }
    }

    pub(crate) fn release(&self, go: bool) {
        *self.open.lock().unwrap_or_else(PoisonError::into_inner) = Some(go);
        self.cvar.notify_all();
    }
}

// ── Member slots ──────────────────────────────────────────────────────────────

/// A spawned member: its handle until joined, then its report.
struct Slot<T> {
    id:     AgentId,
    handle: Option<JoinHandle<Option<T>>>,
    report: Option<T>,
}

impl<T> Slot<T> {
    fn new(id: AgentId, handle: JoinHandle<Option<T>>) -> Self {
        Self { id, handle: Some(handle), report: None }
    }

    fn is_joined(&self) -> bool {
        self.handle.is_none()
    }

    /// Join the thread if it has finished, or unconditionally when `block`.
    fn reap(&mut self, block: bool) -> SimResult<()> {
        let ready = self.handle.as_ref().is_some_and(|h| block || h.is_finished());
        if let Some(handle) = self.handle.take_if(|_| ready) {
            self.report = handle.join().map_err(|_| SimError::AgentPanicked(self.id))?;
        }
        Ok(())
    }

    fn into_report(mut self) -> SimResult<T> {
        self.reap(true)?;
        // Only a member turned away at the start gate has no report, and
        // `run` never joins those.
        self.report.ok_or(SimError::AgentPanicked(self.id))
    }
}

/// Poll the team until every member has finished.
///
/// Each poll joins the members that already ended, so a thread that died
/// mid-run surfaces as [`SimError::AgentPanicked`] right away.  With a
/// `timeout`, a barrier whose completed-round counter stays put that long
/// fails the run with [`SimError::Stalled`].
fn supervise<O>(
    team:    &TeamBinding,
    timeout: Option<Duration>,
    workers: &mut [Slot<AgentReport>],
    watch:   &mut Slot<WatchReport<O>>,
) -> SimResult<()> {
    let poll = timeout
        .map_or(MAX_POLL, |t| (t / 4).clamp(Duration::from_millis(1), MAX_POLL));
    let mut last_rounds = team.barrier.stats().rounds;
    let mut last_progress = Instant::now();

    loop {
        for slot in workers.iter_mut() {
            slot.reap(false)?;
        }
        watch.reap(false)?;
        if watch.is_joined() && workers.iter().all(Slot::is_joined) {
            return Ok(());
        }

        thread::sleep(poll);
        let rounds = team.barrier.stats().rounds;
        if rounds != last_rounds {
            last_rounds = rounds;
            last_progress = Instant::now();
        } else if let Some(timeout) = timeout {
            if last_progress.elapsed() >= timeout {
                let month = team.world.month();
                warn!(rounds, month = month.0, "team stalled; abandoning run");
                return Err(SimError::Stalled { rounds, month });
            }
        }
    }
}
