//! A single simulated agent ("turtle").

use pd_core::{Point, Rect, TraitSet};

/// Position, bounding square, and trait set of one agent.
///
/// `position` and `bound` are fixed at creation; only `traits` changes, and
/// only by wholesale replacement in the owning [`Population`](crate::Population).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub position: Point,
    pub bound:    Rect,
    pub traits:   TraitSet,
}

impl Agent {
    /// Agent centered on `position` with a square bound of half-side `half`.
    pub fn new(position: Point, half: f32, traits: TraitSet) -> Self {
        Self {
            position,
            bound: Rect::centered(position, half),
            traits,
        }
    }

    /// Copy of `self` holding `traits` instead.
    #[inline]
    pub fn with_traits(self, traits: TraitSet) -> Self {
        Self { traits, ..self }
    }
}
