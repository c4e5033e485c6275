//! `eco-models` — the meadow the lock-step team simulates.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`params`]  | `EcologyParams`, `InitialState`                           |
//! | [`weather`] | `Weather` — next month's temperature and precipitation    |
//! | [`grass`]   | `RyeGrass` — grass height                                 |
//! | [`rabbits`] | `Rabbits` — grazer population                             |
//! | [`foxes`]   | `Foxes` — predator population and its catch               |
//! | [`meadow`]  | `Meadow` — builds the world and registers the team        |
//! | [`error`]   | `ModelError`, `ModelResult<T>`                            |
//!
//! # Data flow
//!
//! Every member reads only the previous tick's committed values:
//!
//! ```text
//!  temp, precip ──► RyeGrass ──► height ──► Rabbits ──► rabbits
//!        ▲                          ▲          ▲            │
//!     Weather                       └──────────┼── rabbits ─┤
//!                                              │            ▼
//!                                   hunted ◄── Foxes ◄──────┘
//! ```
//!
//! `hunted` written in tick t is subtracted from the rabbit count by
//! `Rabbits` in tick t+1, and also feeds the fox population update in the
//! same tick t+1.

pub mod error;
pub mod foxes;
pub mod grass;
pub mod meadow;
pub mod params;
pub mod rabbits;
pub mod weather;


pub use error::{ModelError, ModelResult};
pub use foxes::Foxes;
pub use grass::RyeGrass;
pub use meadow::{Meadow, MeadowFields, PredatorFields};
pub use params::{EcologyParams, InitialState, FOX_CEILING, MAX_HUNT_ATTEMPTS};
pub use rabbits::Rabbits;
pub use weather::Weather;
