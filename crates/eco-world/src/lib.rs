//! `eco-world` — the state shared by every member of the team.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`value`]    | `FieldKind`, `Value`, `FieldWrite`                        |
//! | [`schema`]   | `FieldSpec`, `Schema` (names, kinds, lookup by name)      |
//! | [`builder`]  | `WorldBuilder` — declare fields and initial values        |
//! | [`world`]    | `SharedWorld` — month counter + field slots + ownership   |
//! | [`snapshot`] | `WorldSnapshot` — owned copy read during compute          |
//! | [`error`]    | `WorldError`, `WorldResult<T>`                            |
//!
//! # Phase discipline
//!
//! `SharedWorld` is shared by reference between all agent threads and has no
//! lock held across phases.  Every slot is an atomic, so memory safety is
//! never in question; simulation correctness comes from the barrier ordering:
//!
//! - compute reads happen through [`SharedWorld::snapshot`], taken once at the
//!   start of the phase;
//! - commits go through [`SharedWorld::commit`], which rejects writes from any
//!   agent other than the field's single owner;
//! - only the clock owner may call [`SharedWorld::advance_month`].
//!
//! Every committed value is tagged with the month of the tick that wrote it,
//! so tests can check that a compute phase only ever saw earlier rounds.

pub mod builder;
pub mod error;
pub mod schema;
pub mod snapshot;
pub mod value;
pub mod world;


pub use builder::WorldBuilder;
pub use error::{WorldError, WorldResult};
pub use schema::{FieldSpec, Schema};
pub use snapshot::WorldSnapshot;
pub use value::{FieldKind, FieldWrite, Value};
pub use world::SharedWorld;
