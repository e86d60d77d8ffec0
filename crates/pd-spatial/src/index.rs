//! R-tree neighbor index over agent bounds.
//!
//! The R-tree (via `rstar`) stores each agent's bounding square.  A query
//! grows the host's bound by the search radius, collects every bound whose
//! envelope touches it, then applies the strict [`within`] test so results
//! match [`neighbors_of`](crate::neighbors_of) exactly (`rstar` envelope
//! intersection is inclusive of touching edges).

use rstar::{AABB, RTree, RTreeObject};

use pd_agent::Population;
use pd_core::{AgentId, Rect, within};

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct BoundEntry {
    id:    AgentId,
    bound: Rect,
}

impl RTreeObject for BoundEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        rect_envelope(self.bound)
    }
}

#[inline]
fn rect_envelope(r: Rect) -> AABB<[f32; 2]> {
    AABB::from_corners([r.left, r.top], [r.right, r.bottom])
}

// ── NeighborIndex ─────────────────────────────────────────────────────────────

/// Spatial index over a population's bounds.
///
/// Holds a copy of every bound, so it stays valid as long as the population
/// it was built from keeps its positions, which is for the population's
/// whole life.  Rebuild it whenever a new population is installed.
pub struct NeighborIndex {
    tree:   RTree<BoundEntry>,
    bounds: Vec<Rect>,
}

impl NeighborIndex {
    /// Bulk-load the index from `population`.
    pub fn build(population: &Population) -> Self {
        let bounds: Vec<Rect> = population.agents().iter().map(|a| a.bound).collect();
        let entries = bounds
            .iter()
            .enumerate()
            .map(|(i, &bound)| BoundEntry { id: AgentId(i as u32), bound })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
            bounds,
        }
    }

    /// An index with no agents.
    pub fn empty() -> Self {
        Self {
            tree:   RTree::new(),
            bounds: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Agents within `radius` of `host`, ascending by id.
    ///
    /// Empty if `host` was not in the indexed population.
    pub fn neighbors_of(&self, host: AgentId, radius: f32) -> Vec<AgentId> {
        let Some(&host_bound) = self.bounds.get(host.index()) else {
            return Vec::new();
        };
        let halo = rect_envelope(host_bound.expanded(radius));
        let mut found: Vec<AgentId> = self
            .tree
            .locate_in_envelope_intersecting(&halo)
            .filter(|e| e.id != host && within(host_bound, e.bound, radius))
            .map(|e| e.id)
            .collect();
        found.sort_unstable();
        found
    }
}
