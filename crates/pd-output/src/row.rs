//! Plain data row types written by output backends.

use pd_core::AgentId;
use pd_sim::{PopulationSnapshot, TickOutcome};

/// One agent's traits at a given tick.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSnapshotRow {
    pub tick:     u64,
    pub agent_id: u32,
    pub x:        f32,
    pub y:        f32,
    /// Trait labels, ascending by palette index, joined with `;`.
    pub traits:   String,
}

impl AgentSnapshotRow {
    /// One row per agent, ascending by id.
    pub fn from_snapshot(snapshot: &PopulationSnapshot) -> Vec<Self> {
        let palette = snapshot.palette();
        snapshot
            .iter()
            .map(|(id, view)| AgentSnapshotRow {
                tick:     snapshot.tick.0,
                agent_id: id.0,
                x:        view.position.x,
                y:        view.position.y,
                traits:   palette.labels_of(view.traits).join(";"),
            })
            .collect()
    }
}

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:     u64,
    pub host:     u32,
    /// `u32::MAX` when the host had nobody in range.
    pub neighbor: u32,
    pub changed:  bool,
}

impl From<&TickOutcome> for TickSummaryRow {
    fn from(outcome: &TickOutcome) -> Self {
        Self {
            tick:     outcome.tick.0,
            host:     outcome.host.0,
            neighbor: outcome.neighbor.unwrap_or(AgentId::INVALID).0,
            changed:  outcome.changed(),
        }
    }
}
