//! `pd-agent` — agent storage and population generation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`agent`]     | `Agent` — position, bound, trait set                         |
//! | [`store`]     | `Population` — id-keyed agent store                          |
//! | [`builder`]   | `PopulationBuilder` — hand-placed populations (fixtures)     |
//! | [`factory`]   | `AgentFactory` — random non-overlapping populations          |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `serde`    | Derives `Serialize`/`Deserialize` on `Agent`.              |

pub mod agent;
pub mod builder;
pub mod factory;
pub mod store;


pub use agent::Agent;
pub use builder::PopulationBuilder;
pub use factory::{AgentFactory, MAX_LAYOUT_RESTARTS, MAX_PLACEMENT_ATTEMPTS};
pub use store::Population;
