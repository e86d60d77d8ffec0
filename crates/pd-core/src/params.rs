//! Simulation parameters supplied by the caller before initialization.

use crate::arena::DEFAULT_ARENA_SIZE;

/// Ticks between progress reports during a continuous run.
pub const PROGRESS_INTERVAL: u64 = 10;

/// Top-level simulation parameters.
///
/// Typically filled from the control panel (CLI flags) or loaded from a JSON
/// file by the application crate and passed to `Engine::initialize`.
/// Defaults match the reference control panel.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimParams {
    /// `n`: number of agents in the population.
    pub num_agents: usize,

    /// `m`: traits per agent.  Values above the palette length are capped.
    pub num_traits: usize,

    /// `r`: how far past its own bound an agent looks for neighbors.
    pub search_radius: f32,

    /// `k`: ticks performed by a full run.
    pub max_iterations: u64,

    /// Ticks performed by one step.
    pub step_batch_size: u64,

    /// Side length of the square arena.
    pub arena_size: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            num_agents:      30,
            num_traits:      5,
            search_radius:   50.0,
            max_iterations:  500,
            step_batch_size: 10,
            arena_size:      DEFAULT_ARENA_SIZE,
        }
    }
}
