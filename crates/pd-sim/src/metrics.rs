//! Cluster statistics over a population.
//!
//! A *bubble* is a connected group of at least two agents where every link
//! joins two agents that are neighbors under the search radius and hold
//! identical trait sets.  Agents with nobody in range are *isolated*.

use petgraph::unionfind::UnionFind;

use pd_agent::Population;
use pd_core::TraitSet;
use pd_spatial::NeighborIndex;

#[cfg(feature = "fx-hash")]
type PatternSet<T> = rustc_hash::FxHashSet<T>;
#[cfg(not(feature = "fx-hash"))]
type PatternSet<T> = std::collections::HashSet<T>;

/// Summary of how far a population has converged.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PopulationMetrics {
    pub agents:            usize,
    /// Number of distinct trait sets held.
    pub distinct_patterns: usize,
    /// Number of distinct traits held by at least one agent.
    pub distinct_traits:   usize,
    pub bubbles:           usize,
    /// Size of the largest bubble, 0 when there is none.
    pub largest_bubble:    usize,
    pub isolated:          usize,
}

impl PopulationMetrics {
    /// Measure `population` using `index` (built from the same population).
    pub fn measure(population: &Population, index: &NeighborIndex, radius: f32) -> Self {
        let n = population.len();
        let agents = population.agents();

        let patterns: PatternSet<TraitSet> = agents.iter().map(|a| a.traits).collect();
        let held = agents
            .iter()
            .fold(TraitSet::EMPTY, |acc, a| acc.union(a.traits));

        let mut groups = UnionFind::<usize>::new(n);
        let mut isolated = 0;
        for (id, agent) in population.iter() {
            let neighbors = index.neighbors_of(id, radius);
            if neighbors.is_empty() {
                isolated += 1;
            }
            for other in neighbors {
                if other > id && agents[other.index()].traits == agent.traits {
                    groups.union(id.index(), other.index());
                }
            }
        }

        let mut sizes = vec![0usize; n];
        for root in groups.into_labeling() {
            sizes[root] += 1;
        }
        let bubbles = sizes.iter().filter(|&&s| s >= 2).count();
        let largest_bubble = sizes.iter().copied().filter(|&s| s >= 2).max().unwrap_or(0);

        Self {
            agents: n,
            distinct_patterns: patterns.len(),
            distinct_traits: held.len(),
            bubbles,
            largest_bubble,
            isolated,
        }
    }

    /// Convenience for callers without an index at hand.
    pub fn of(population: &Population, radius: f32) -> Self {
        Self::measure(population, &NeighborIndex::build(population), radius)
    }

    /// `true` once every agent holds the same trait set.
    pub fn is_uniform(&self) -> bool {
        self.distinct_patterns <= 1
    }
}
