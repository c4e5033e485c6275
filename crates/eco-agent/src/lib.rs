//! `eco-agent` — what a team member computes and how it keeps step.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`context`]  | `TickContext<'a>` — the snapshot a tick function reads          |
//! | [`model`]    | `TickFunction` trait, `IdleTick`, `FnTick` / [`from_fn`]        |
//! | [`observer`] | `Observer` trait (observation-phase collaborator), `NoopObserver` |
//! | [`phase`]    | `Phase`, `PhaseCounts`, `Crossing`, `PhaseTrace`                |
//! | [`agent`]    | `Agent`, `TeamBinding`, `AgentReport` — the per-tick loop        |
//! | [`error`]    | `AgentError`, `AgentResult<T>`                                  |
//!
//! # The tick
//!
//! ```text
//! while world.month() < horizon:
//!   ① Compute  — snapshot the world, run the tick function (parallel, no writes)
//!   ── wait ──  compute done
//!   ② Commit   — write this agent's next values into the fields it owns
//!   ── wait ──  assign done
//!   ③ Observe  — the watcher reports and advances the month; others idle
//!   ── wait ──  observe done
//! ```
//!
//! All three waits are mandatory for every member on every tick.  Dropping
//! one lets a member read a half-committed world, or lets time advance
//! before every commit has landed.
//!
//! The loop ends when the month counter reaches the horizon.  Every member
//! reads the same counter after the same barrier, so the whole team stops
//! on the same tick without any stop signal.

pub mod agent;
pub mod context;
pub mod error;
pub mod model;
pub mod observer;
pub mod phase;


pub use agent::{Agent, AgentReport, TeamBinding, WatchReport};
pub use context::TickContext;
pub use error::{AgentError, AgentResult};
pub use model::{FnTick, IdleTick, TickFunction, from_fn};
pub use observer::{NoopObserver, Observer};
pub use phase::{Crossing, Phase, PhaseCounts, PhaseTrace};
