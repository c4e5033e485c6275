use eco_core::{AgentId, FieldId};
use thiserror::Error;

use crate::FieldKind;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("field `{0}` declared twice")]
    DuplicateField(String),

    #[error("too many fields for a FieldId")]
    TooManyFields,

    #[error("{0} is not part of the world schema")]
    UnknownField(FieldId),

    #[error("{field} is owned by {owner}; {claimant} cannot also claim it")]
    AlreadyOwned {
        field:    FieldId,
        owner:    AgentId,
        claimant: AgentId,
    },

    #[error("{agent} does not own {field}")]
    NotOwner {
        field: FieldId,
        agent: AgentId,
    },

    #[error("{field} holds {expected:?} values, got {got:?}")]
    KindMismatch {
        field:    FieldId,
        expected: FieldKind,
        got:      FieldKind,
    },

    #[error("the clock is owned by {owner}; {claimant} cannot also claim it")]
    ClockAlreadyOwned {
        owner:    AgentId,
        claimant: AgentId,
    },

    #[error("{0} does not own the clock")]
    NotClockOwner(AgentId),
}

pub type WorldResult<T> = Result<T, WorldError>;
