//! Fluent builder for hand-placed populations.
//!
//! # Usage
//!
//! ```rust
//! use pd_agent::PopulationBuilder;
//! use pd_core::{Arena, Palette, Point};
//!
//! let palette = Palette::new(["A", "B", "C", "D"]).unwrap();
//! let population = PopulationBuilder::new(Arena::default())
//!     .agent(Point::new(100.0, 100.0), palette.set_of(["A", "B"]).unwrap())
//!     .agent(Point::new(160.0, 100.0), palette.set_of(["B", "C"]).unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(population.len(), 2);
//! ```
//!
//! Random populations come from [`AgentFactory`](crate::AgentFactory); this
//! builder is for fixtures and scripted scenarios where positions and traits
//! must be exact.

use pd_core::{Arena, PdError, PdResult, Point, TraitSet, overlaps};

use crate::{Agent, Population};

/// Fluent builder for a [`Population`] with explicit positions and traits.
///
/// Ids are assigned in insertion order starting at 0.
pub struct PopulationBuilder {
    arena:  Arena,
    agents: Vec<Agent>,
}

impl PopulationBuilder {
    pub fn new(arena: Arena) -> Self {
        Self { arena, agents: Vec::new() }
    }

    /// Append an agent centered on `center`.
    pub fn agent(mut self, center: Point, traits: TraitSet) -> Self {
        self.agents.push(Agent::new(center, self.arena.half_size, traits));
        self
    }

    /// Check placement and return the population.
    ///
    /// Fails if any bound leaves the arena or two bounds overlap; the same
    /// guarantees a factory-built population carries.
    pub fn build(self) -> PdResult<Population> {
        for (i, agent) in self.agents.iter().enumerate() {
            if !self.arena.contains(agent.bound) {
                return Err(PdError::InvalidParameter(format!(
                    "agent {i} at {} lies outside the arena",
                    agent.position
                )));
            }
            if let Some(j) = self.agents[..i].iter().position(|o| overlaps(o.bound, agent.bound)) {
                return Err(PdError::InvalidParameter(format!(
                    "agent {i} at {} overlaps agent {j}",
                    agent.position
                )));
            }
        }
        Ok(Population::from_agents(self.agents))
    }
}
