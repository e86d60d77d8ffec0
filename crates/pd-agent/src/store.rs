//! `Population` — the id-keyed agent store.
//!
//! Ids are dense (`0..n`) and never reused, so the store is a plain `Vec`
//! indexed by `AgentId`:
//!
//! ```ignore
//! let agent = &population.agents()[id.index()];  // O(1)
//! ```
//!
//! Neighbor relations are not stored; they are computed on demand from the
//! bounds by `pd-spatial`.

use pd_core::{AgentId, PdError, PdResult, TraitSet};

use crate::Agent;

/// The full set of agents of one simulation run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Population {
    agents: Vec<Agent>,
}

impl Population {
    /// Wrap agents whose ids are their positions in `agents`.
    pub fn from_agents(agents: Vec<Agent>) -> Self {
        Self { agents }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    pub fn contains(&self, id: AgentId) -> bool {
        id.index() < self.agents.len()
    }

    /// Read-only slice indexed by `AgentId`.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Iterator over all ids in ascending order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.agents.len() as u32).map(AgentId)
    }

    /// `(id, agent)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &Agent)> + '_ {
        self.agents
            .iter()
            .enumerate()
            .map(|(i, a)| (AgentId(i as u32), a))
    }

    /// Replace an agent's trait set, returning the previous one.
    ///
    /// This is the only mutation a population undergoes after creation.
    pub fn replace_traits(&mut self, id: AgentId, traits: TraitSet) -> PdResult<TraitSet> {
        let agent = self
            .agents
            .get_mut(id.index())
            .ok_or(PdError::AgentNotFound(id))?;
        let old = agent.traits;
        *agent = agent.with_traits(traits);
        Ok(old)
    }
}
