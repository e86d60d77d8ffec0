//! Fluent builder for constructing an [`Engine`].

use pd_behavior::{AxelrodRule, InteractionRule};
use pd_core::Palette;

use crate::Engine;

/// Fluent builder for [`Engine<R>`].
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                          |
/// |-----------------|----------------------------------|
/// | `.palette(p)`   | `Palette::default()` (26 colors) |
/// | `.rule(r)`      | `AxelrodRule`                    |
///
/// # Example
///
/// ```rust
/// use pd_core::{Palette, SimParams};
/// use pd_sim::EngineBuilder;
///
/// let mut engine = EngineBuilder::new(42)
///     .palette(Palette::new(["A", "B", "C", "D"]).unwrap())
///     .build();
/// let snapshot = engine
///     .initialize(SimParams { num_agents: 3, num_traits: 2, ..SimParams::default() })
///     .unwrap();
/// assert_eq!(snapshot.len(), 3);
/// ```
pub struct EngineBuilder<R: InteractionRule = AxelrodRule> {
    seed:    u64,
    palette: Palette,
    rule:    R,
}

impl EngineBuilder<AxelrodRule> {
    /// Builder seeded with `seed`; every random draw of the engine derives
    /// from it.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            palette: Palette::default(),
            rule:    AxelrodRule,
        }
    }
}

impl<R: InteractionRule> EngineBuilder<R> {
    /// Trait labels agents draw from.
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Swap in a different interaction rule.
    pub fn rule<R2: InteractionRule>(self, rule: R2) -> EngineBuilder<R2> {
        EngineBuilder {
            seed:    self.seed,
            palette: self.palette,
            rule,
        }
    }

    pub fn build(self) -> Engine<R> {
        Engine::from_parts(self.seed, self.palette, self.rule)
    }
}
