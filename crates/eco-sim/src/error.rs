use eco_agent::AgentError;
use eco_barrier::BarrierError;
use eco_core::{AgentId, EcoError, Month};
use eco_world::WorldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] EcoError),

    #[error("config expects a team of {expected} but {got} agents were registered")]
    TeamSizeMismatch {
        expected: usize,
        got:      usize,
    },

    #[error("ownership setup failed: {0}")]
    Ownership(#[from] WorldError),

    #[error("barrier setup failed: {0}")]
    Barrier(#[from] BarrierError),

    /// Members spawned before the failure are turned away at the start
    /// gate and exit.
    #[error("failed to spawn agent thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("{agent} violated the commit protocol: {source}")]
    Protocol {
        agent:  AgentId,
        source: WorldError,
    },

    #[error("phase trace misaligned: {0}")]
    PhaseMisaligned(#[from] AgentError),

    /// A tick function panicked (the team still finished), or a member's
    /// thread died outside its tick function.
    #[error("{0} panicked")]
    AgentPanicked(AgentId),

    #[error("team stalled at {month} after {rounds} barrier rounds")]
    Stalled {
        rounds: u64,
        month:  Month,
    },
}

pub type SimResult<T> = Result<T, SimError>;
