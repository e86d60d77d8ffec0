//! Simulation observer trait for progress reporting and data collection.

use pd_behavior::Exchange;
use pd_core::{AgentId, Tick};

use crate::PopulationSnapshot;

/// What happened during one tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TickOutcome {
    pub tick:     Tick,
    pub host:     AgentId,
    /// `None` when the host had nobody in range (the tick was a no-op).
    pub neighbor: Option<AgentId>,
    /// `Some` when the rule fired and the host's traits were replaced.
    pub exchange: Option<Exchange>,
}

impl TickOutcome {
    /// `true` if the tick changed the population.
    #[inline]
    pub fn changed(&self) -> bool {
        self.exchange.is_some()
    }
}

/// Callbacks invoked by [`Engine::step_with`][crate::Engine::step_with] and
/// [`Engine::run`][crate::Engine::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_progress(&mut self, index: u64, snapshot: &PopulationSnapshot) {
///         println!("tick {index}: {} agents", snapshot.len());
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called after every tick, stepped or run.
    fn on_tick_end(&mut self, _outcome: &TickOutcome) {}

    /// Called during a run after every tick whose run-relative index is a
    /// multiple of the progress interval (0, 10, 20, …).  This is the point
    /// where a renderer redraws.
    fn on_progress(&mut self, _index: u64, _snapshot: &PopulationSnapshot) {}

    /// Called once after the last tick of a run with the final state.
    fn on_run_end(&mut self, _final_tick: Tick, _snapshot: &PopulationSnapshot) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
