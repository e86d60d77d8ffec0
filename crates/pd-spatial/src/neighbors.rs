//! Linear-scan neighbor query.

use pd_agent::Population;
use pd_core::{AgentId, within};

/// Every agent other than `host` whose bound reaches into `host`'s bound
/// grown by `radius`.
///
/// O(population) per call.  Returns ids in ascending order; empty if `host`
/// is not in the population or nobody is in range.
pub fn neighbors_of(host: AgentId, population: &Population, radius: f32) -> Vec<AgentId> {
    let Some(host_agent) = population.get(host) else {
        return Vec::new();
    };
    population
        .iter()
        .filter(|&(id, other)| id != host && within(host_agent.bound, other.bound, radius))
        .map(|(id, _)| id)
        .collect()
}
