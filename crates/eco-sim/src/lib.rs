//! `eco-sim` — runs a fixed team of agents in lock-step.
//!
//! # Run
//!
//! ```text
//! build:
//!   validate config (team size ≥ 1, matches registered agents)
//!   claim ownership: every field listed by a tick function's `writes()`
//!   goes to that agent; the watcher (last id) owns the clock
//!   build the barrier for N members
//! run:
//!   spawn N threads (workers 0..N-1, watcher N-1), then open the start gate
//!   poll: join finished members; [watchdog] give up if rounds stop moving
//!   join all, collect reports, surface panics and protocol violations
//! ```
//!
//! Every member's thread runs [`eco_agent::Agent`]'s three-barrier loop.
//! The driver never touches the world while the team is running.
//!
//! # Liveness
//!
//! Members are held at a start gate until every thread exists, so a failed
//! spawn leaves no one waiting at a barrier.  A tick function that panics is
//! contained by the agent loop: the member goes idle, keeps crossing
//! barriers, and `run` returns [`SimError::AgentPanicked`] after the join.
//! A thread that dies some other way is joined on the next poll and reported
//! the same way, with the rest of the team left detached.
//!
//! A member that blocks forever leaves the rest of the team parked at the
//! barrier.  Without a watchdog `run` then never returns.  With
//! `watchdog_ms` set, `run` returns [`SimError::Stalled`] and the stuck
//! threads are left detached.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let mut b = WorldBuilder::new();
//! let height = b.add_float("height", 5.0)?;
//! let world = b.build();
//!
//! let report = SimBuilder::new(config, world, NoopObserver)
//!     .agent(Grow { height })
//!     .build()?
//!     .run()?;
//! println!("stopped at {}", report.final_month);
//! ```

pub mod builder;
pub mod error;
pub mod report;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use report::SimReport;
pub use sim::Sim;
