//! Errors raised by the engine and its shared handle.

use pd_core::PdError;
use thiserror::Error;

use crate::EngineState;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] PdError),

    /// The operation is not legal in the engine's current state: stepping or
    /// running before initialization, or anything while a step or run is in
    /// flight.  The engine is left exactly as it was.
    #[error("cannot {op} while the engine is {state}")]
    InvalidState {
        op:    &'static str,
        state: EngineState,
    },

    /// A thread panicked while holding the shared engine lock.
    #[error("shared engine lock poisoned")]
    Poisoned,
}

pub type SimResult<T> = Result<T, SimError>;
