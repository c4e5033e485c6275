use eco_core::AgentId;
use thiserror::Error;

use crate::Crossing;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AgentError {
    #[error(
        "{agent} left crossing #{index} as {got:?}, but {reference} left it as {expected:?}"
    )]
    Misaligned {
        agent:     AgentId,
        reference: AgentId,
        index:     usize,
        expected:  Option<Crossing>,
        got:       Option<Crossing>,
    },
}

pub type AgentResult<T> = Result<T, AgentError>;
