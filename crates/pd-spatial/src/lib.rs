//! `pd-spatial` — which agents are within interaction range of which.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`neighbors`] | `neighbors_of` — reference linear scan over a population  |
//! | [`index`]     | `NeighborIndex` — R-tree over the (immutable) bounds      |
//!
//! Both answer the same query with the same ids in the same (ascending)
//! order.  Positions never change after a population is created, so the
//! index is built once per population and reused for every tick.

pub mod index;
pub mod neighbors;


pub use index::NeighborIndex;
pub use neighbors::neighbors_of;
