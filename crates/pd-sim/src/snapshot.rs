//! Read-only population views handed to renderers and callers.

use std::collections::BTreeMap;

use pd_agent::Population;
use pd_core::{AgentId, Palette, Point, Tick, TraitSet};

/// What a renderer needs to draw one agent.
///
/// The bound is not included: it is the agent half-size around `position`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AgentView {
    pub position: Point,
    pub traits:   TraitSet,
}

/// An owned copy of the population at one tick.
///
/// Snapshots never alias engine state, so a caller may keep, send, or render
/// one while the engine keeps mutating its own population.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PopulationSnapshot {
    /// Engine tick at which the snapshot was taken.
    pub tick:   Tick,
    pub agents: BTreeMap<AgentId, AgentView>,
    #[cfg_attr(feature = "serde", serde(skip))]
    palette:    Palette,
}

impl PopulationSnapshot {
    pub fn capture(tick: Tick, population: &Population, palette: &Palette) -> Self {
        let agents = population
            .iter()
            .map(|(id, a)| (id, AgentView { position: a.position, traits: a.traits }))
            .collect();
        Self { tick, agents, palette: palette.clone() }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, id: AgentId) -> Option<&AgentView> {
        self.agents.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &AgentView)> + '_ {
        self.agents.iter().map(|(&id, v)| (id, v))
    }

    /// Palette the trait ids refer to.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Labels of an agent's traits, ascending by palette index.
    pub fn labels(&self, id: AgentId) -> Option<Vec<&str>> {
        self.get(id).map(|v| self.palette.labels_of(v.traits))
    }
}
