//! Random population generation with non-overlapping placement.
//!
//! # Placement
//!
//! Agents are placed one slot at a time (random sequential placement).  For
//! each slot a trait set and a center are drawn; if the candidate bound
//! overlaps any agent already placed, the slot is redrawn.  Sequential
//! placement can paint itself into a corner before reaching the requested
//! count, so each slot gets [`MAX_PLACEMENT_ATTEMPTS`] draws and a stuck
//! layout is thrown away and restarted up to [`MAX_LAYOUT_RESTARTS`] times
//! before giving up with [`PdError::Capacity`].

use tracing::{debug, warn};

use pd_core::{Arena, Palette, PdError, PdResult, SimRng, TraitId, TraitSet, overlaps};

use crate::{Agent, Population};

/// Draws allowed for a single slot before the layout counts as stuck.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

/// Fresh layouts tried after the first one gets stuck.
pub const MAX_LAYOUT_RESTARTS: usize = 8;

/// Builds random populations inside an [`Arena`] from a [`Palette`].
#[derive(Clone, Debug)]
pub struct AgentFactory {
    arena:       Arena,
    palette_len: usize,
}

impl AgentFactory {
    pub fn new(arena: Arena, palette: &Palette) -> Self {
        Self { arena, palette_len: palette.len() }
    }

    /// Generate `n` agents with `m` traits each.
    ///
    /// `m` above the palette length is capped to the palette length.  Fails
    /// with [`PdError::Capacity`] if `n` exceeds the arena capacity, or if no
    /// non-overlapping layout could be found within the retry budget.
    pub fn populate(&self, n: usize, m: usize, rng: &mut SimRng) -> PdResult<Population> {
        if n > self.arena.capacity {
            return Err(PdError::Capacity {
                requested: n,
                capacity:  self.arena.capacity,
            });
        }
        let m = m.min(self.palette_len);

        let mut best = 0;
        for attempt in 0..=MAX_LAYOUT_RESTARTS {
            match self.try_layout(n, m, rng) {
                Ok(agents) => {
                    debug!(agents = n, traits = m, restarts = attempt, "population placed");
                    return Ok(Population::from_agents(agents));
                }
                Err(placed) => {
                    warn!(placed, requested = n, attempt, "placement stuck; restarting layout");
                    best = best.max(placed);
                }
            }
        }
        Err(PdError::Capacity { requested: n, capacity: best })
    }

    /// One layout pass.  `Err` carries how many agents were placed before a
    /// slot exhausted its draws.
    fn try_layout(&self, n: usize, m: usize, rng: &mut SimRng) -> Result<Vec<Agent>, usize> {
        let mut agents: Vec<Agent> = Vec::with_capacity(n);
        while agents.len() < n {
            let candidate = (0..MAX_PLACEMENT_ATTEMPTS).find_map(|_| {
                let traits = self.sample_traits(m, rng);
                let center = self.arena.sample_center(rng);
                let agent = Agent::new(center, self.arena.half_size, traits);
                let clear = agents.iter().all(|a| !overlaps(a.bound, agent.bound));
                clear.then_some(agent)
            });
            match candidate {
                Some(agent) => agents.push(agent),
                None => return Err(agents.len()),
            }
        }
        Ok(agents)
    }

    /// `m` distinct traits, uniform without replacement over the palette.
    pub fn sample_traits(&self, m: usize, rng: &mut SimRng) -> TraitSet {
        let m = m.min(self.palette_len);
        rand::seq::index::sample(rng.inner(), self.palette_len, m)
            .into_iter()
            .map(|i| TraitId(i as u8))
            .collect()
    }
}
