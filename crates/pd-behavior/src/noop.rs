//! A rule that never fires.

use pd_agent::Agent;
use pd_core::SimRng;

use crate::{Exchange, InteractionRule};

/// An [`InteractionRule`] that always leaves the host unchanged.
///
/// Useful as a control: every tick still picks a host and a neighbor, but
/// the population is frozen.
pub struct NoopRule;

impl InteractionRule for NoopRule {
    fn interact(&self, _host: &Agent, _neighbor: &Agent, _rng: &mut SimRng) -> Option<Exchange> {
        None
    }
}
