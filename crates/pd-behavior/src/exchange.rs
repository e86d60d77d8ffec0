//! The outcome of a rule that fired.

use pd_core::{TraitId, TraitSet};

/// A one-for-one trait swap on the host.
///
/// `traits` is the host's complete new set: the old set minus `dropped`, plus
/// `adopted`.  Its size equals the old set's size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exchange {
    pub dropped: TraitId,
    pub adopted: TraitId,
    pub traits:  TraitSet,
}
