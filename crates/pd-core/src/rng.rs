//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! Every random draw in a run (trait sampling, placement, host selection,
//! neighbor selection, trait exchange) comes from one `SmallRng` sequence
//! owned by the engine.  The same seed and the same sequence of engine calls
//! therefore always produce the same population.  There is no per-agent
//! stream: ticks are strictly sequential, so a single stream is both simpler
//! and sufficient.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-level RNG.
///
/// Used only from the single thread that currently owns the engine.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` helpers
    /// (`rand::seq::index::sample`, distributions, …).
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform index into a collection of length `len`.
    /// Returns `None` if `len == 0`.
    #[inline]
    pub fn index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.0.gen_range(0..len))
    }
}
