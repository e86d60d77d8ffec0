//! Engine lifecycle states.

use std::fmt;

/// Where the engine is in its lifecycle.
///
/// ```text
/// Uninitialized ──initialize──▶ Initialized ──step──▶ Stepping ──┐
///                                   ▲   │                         │
///                                   │   └──run──▶ Running ────────┤
///                                   └─────────────────────────────┘
/// ```
///
/// `Stepping` and `Running` are busy states: every other operation is
/// rejected until the engine is back in `Initialized`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EngineState {
    Uninitialized,
    Initialized,
    Stepping,
    Running,
}

impl EngineState {
    /// `true` while a step or run is in flight.
    #[inline]
    pub fn is_busy(self) -> bool {
        matches!(self, EngineState::Stepping | EngineState::Running)
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EngineState::Uninitialized => "uninitialized",
            EngineState::Initialized   => "initialized",
            EngineState::Stepping      => "stepping",
            EngineState::Running       => "running",
        };
        f.write_str(s)
    }
}
