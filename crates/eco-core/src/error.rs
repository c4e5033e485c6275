//! Base error type.
//!
//! Sub-crates define their own error enums and either wrap `EcoError` as one
//! variant or convert into it via `From`.  Prefer whichever keeps error sites
//! clean.

use thiserror::Error;

/// The top-level error type for `eco-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum EcoError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `eco-*` crates.
pub type EcoResult<T> = Result<T, EcoError>;
