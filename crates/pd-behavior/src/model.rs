//! The `InteractionRule` trait — the extension point for interaction dynamics.

use pd_agent::Agent;
use pd_core::SimRng;

use crate::Exchange;

/// Pluggable pairwise interaction.
///
/// Called once per tick with the chosen host and one of its neighbors.
/// Return `Some(exchange)` to replace the host's trait set with
/// `exchange.traits`, or `None` to leave both agents as they are.
///
/// All randomness must come from `rng` so runs stay reproducible.
///
/// # Example
///
/// ```rust,ignore
/// struct AlwaysCopyFirst;
///
/// impl InteractionRule for AlwaysCopyFirst {
///     fn interact(&self, host: &Agent, neighbor: &Agent, _rng: &mut SimRng) -> Option<Exchange> {
///         let adopted = neighbor.traits.difference(host.traits).nth(0)?;
///         let dropped = host.traits.difference(neighbor.traits).nth(0)?;
///         let mut traits = host.traits;
///         traits.remove(dropped);
///         traits.insert(adopted);
///         Some(Exchange { dropped, adopted, traits })
///     }
/// }
/// ```
pub trait InteractionRule: Send + Sync + 'static {
    fn interact(&self, host: &Agent, neighbor: &Agent, rng: &mut SimRng) -> Option<Exchange>;
}
