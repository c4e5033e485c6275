use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BarrierError {
    #[error("a barrier team needs at least one member")]
    EmptyTeam,
}

pub type BarrierResult<T> = Result<T, BarrierError>;
