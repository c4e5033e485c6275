use eco_world::WorldError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("ecology parameter `{name}` is invalid: {value}")]
    InvalidParam { name: &'static str, value: f64 },

    #[error("initial state `{name}` is invalid: {value}")]
    InvalidInitial { name: &'static str, value: f64 },

    #[error(transparent)]
    World(#[from] WorldError),
}

pub type ModelResult<T> = Result<T, ModelError>;
