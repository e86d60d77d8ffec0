//! Axelrod-style cultural dissemination.
//!
//! Agents that share some traits but not all of them become a little more
//! alike: the host adopts one of the neighbor's traits it lacks and gives up
//! one of its own that the neighbor lacks.  Agents that agree on everything,
//! or on nothing, do not interact at all.  Repeated over many ticks this
//! drives spatial clusters toward identical trait sets (filter bubbles).

use pd_agent::Agent;
use pd_core::SimRng;

use crate::{Exchange, InteractionRule};

/// The default interaction rule.
///
/// Fires only when the shared set is non-empty and strictly smaller than the
/// host's set.  The adopted trait is drawn first, uniformly from the
/// neighbor-only traits, then the dropped trait, uniformly from the
/// host-only traits.  If either side has nothing unique the host is left
/// unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct AxelrodRule;

impl InteractionRule for AxelrodRule {
    fn interact(&self, host: &Agent, neighbor: &Agent, rng: &mut SimRng) -> Option<Exchange> {
        let shared = host.traits.intersection(neighbor.traits);
        if shared.is_empty() || shared.len() >= host.traits.len() {
            return None;
        }

        let host_only = host.traits.difference(neighbor.traits);
        let neighbor_only = neighbor.traits.difference(host.traits);
        if host_only.is_empty() || neighbor_only.is_empty() {
            return None;
        }

        let adopted = neighbor_only.nth(rng.index(neighbor_only.len())?)?;
        let dropped = host_only.nth(rng.index(host_only.len())?)?;

        let mut traits = host.traits;
        traits.remove(dropped);
        traits.insert(adopted);
        Some(Exchange { dropped, adopted, traits })
    }
}
