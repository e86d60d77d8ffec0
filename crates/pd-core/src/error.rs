//! Domain error type.
//!
//! Sub-crates may define their own error enums and convert `PdError` into
//! them via `From` impls (as `pd-sim` does), or return it directly.

use thiserror::Error;

use crate::AgentId;

/// Errors raised while building or querying a population.
#[derive(Debug, Error)]
pub enum PdError {
    /// More agents were requested than the arena can place without overlap.
    #[error(
        "this simulation world is not big enough for more than {capacity} turtles \
         (requested {requested})"
    )]
    Capacity { requested: usize, capacity: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("agent {0} not found")]
    AgentNotFound(AgentId),
}

/// Shorthand result type for all `pd-*` crates.
pub type PdResult<T> = Result<T, PdError>;
