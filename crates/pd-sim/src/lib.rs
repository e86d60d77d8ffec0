//! `pd-sim` — the simulation engine for the preference dispersion model.
//!
//! # Tick
//!
//! ```text
//! tick:
//!   ① Host      — one agent, uniformly at random.
//!   ② Neighbors — every other agent whose bound lies within the search
//!                 radius of the host's bound (NeighborIndex).
//!   ③ Partner   — one neighbor, uniformly at random; none → no-op tick.
//!   ④ Rule      — InteractionRule::interact(host, neighbor); on Some the
//!                 host's trait set is replaced, the neighbor is untouched.
//! ```
//!
//! # Control surface
//!
//! | Call                         | Effect                                          |
//! |------------------------------|-------------------------------------------------|
//! | `Engine::initialize(params)` | fresh population, tick reset, console reset     |
//! | `Engine::step(k)`            | exactly `k` ticks, no progress reports          |
//! | `Engine::run(k, observer)`   | `k` ticks, progress after ticks 0, 10, 20, …    |
//! | `SharedEngine::run(k, f)`    | same, releasing the lock between reports        |
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                    |
//! |-----------|-----------------------------------------------------------|
//! | `async`   | `SharedEngine` (tokio); on by default.                    |
//! | `fx-hash` | FxHash for the metrics pattern sets.                      |
//! | `serde`   | `Serialize` on snapshots and metrics.                     |
//!
//! # Quick-start
//!
//! ```rust
//! use pd_core::SimParams;
//! use pd_sim::{Engine, NoopObserver};
//!
//! let mut engine = Engine::new(7);
//! engine.initialize(SimParams::default()).unwrap();
//! engine.step(10).unwrap();
//! let snapshot = engine.run(100, &mut NoopObserver).unwrap();
//! assert_eq!(snapshot.tick.0, 110);
//! ```

pub mod builder;
pub mod console;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod observer;
#[cfg(feature = "async")]
pub mod shared;
pub mod snapshot;
pub mod state;

#[cfg(test)]
mod tests;

pub use builder::EngineBuilder;
pub use console::{ConsoleLine, ConsoleLog, Severity};
pub use engine::Engine;
pub use error::{SimError, SimResult};
pub use metrics::PopulationMetrics;
pub use observer::{NoopObserver, SimObserver, TickOutcome};
#[cfg(feature = "async")]
pub use shared::SharedEngine;
pub use snapshot::{AgentView, PopulationSnapshot};
pub use state::EngineState;
