//! `pd-behavior` — the pairwise interaction rule and its outcome type.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`exchange`] | `Exchange` — the trait swap a firing rule produces            |
//! | [`model`]    | `InteractionRule` trait                                       |
//! | [`axelrod`]  | `AxelrodRule` — partial-overlap convergence (the default)     |
//! | [`noop`]     | `NoopRule` — never fires                                      |
//!
//! # Design notes
//!
//! A rule only *computes* an exchange from two read-only agents.  Applying it
//! (replacing the host's trait set in the population) is the engine's job in
//! `pd-sim`, so a rule can never mutate the neighbor and never holds a
//! reference into the population.

pub mod axelrod;
pub mod exchange;
pub mod model;
pub mod noop;


pub use axelrod::AxelrodRule;
pub use exchange::Exchange;
pub use model::InteractionRule;
pub use noop::NoopRule;
