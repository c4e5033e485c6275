//! `eco-core` — foundational types for the lock-step ecosystem simulator.
//!
//! This crate is a dependency of every other `eco-*` crate.  It intentionally
//! has no `eco-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `FieldId`                                      |
//! | [`time`]    | `Month`, `Calendar`, `SimConfig`, `BarrierKind`           |
//! | [`rng`]     | `RandomSource` trait, `AgentRng` (per-agent), `SimRng`    |
//! | [`error`]   | `EcoError`, `EcoResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{EcoError, EcoResult};
pub use ids::{AgentId, FieldId};
pub use rng::{AgentRng, RandomSource, SimRng};
pub use time::{BarrierKind, Calendar, Month, SimConfig};
