//! `pd-core` — foundational types for the preference dispersion simulation.
//!
//! This crate is a dependency of every other `pd-*` crate.  It intentionally
//! has no `pd-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `TraitId`                                  |
//! | [`geo`]         | `Point`, `Rect`, `overlaps`, `within`                 |
//! | [`arena`]       | `Arena` — bounded placement area and its capacity     |
//! | [`traits`]      | `TraitSet` bitset, `Palette` of trait labels          |
//! | [`params`]      | `SimParams` and the parameter limits                  |
//! | [`time`]        | `Tick`                                                |
//! | [`rng`]         | `SimRng` (single seeded sequence)                     |
//! | [`error`]       | `PdError`, `PdResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on the public value types; needed |
//! |         | to load `SimParams` from a JSON file.                       |

pub mod arena;
pub mod error;
pub mod geo;
pub mod ids;
pub mod params;
pub mod rng;
pub mod time;
pub mod traits;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use arena::Arena;
pub use error::{PdError, PdResult};
pub use geo::{Point, Rect, overlaps, within};
pub use ids::{AgentId, TraitId};
pub use params::SimParams;
pub use rng::SimRng;
pub use time::Tick;
pub use traits::{Palette, TraitSet};
