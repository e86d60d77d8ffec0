//! Seed sweep: the same parameters over many seeds, one engine per seed, in
//! parallel on rayon's pool.

use std::ops::Range;

use anyhow::Result;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use pd_core::{Palette, SimParams};
use pd_sim::{EngineBuilder, NoopObserver, PopulationMetrics};

#[derive(Debug, Serialize)]
pub struct SweepRun {
    pub seed:    u64,
    pub initial: PopulationMetrics,
    #[serde(rename = "final")]
    pub last:    PopulationMetrics,
}

#[derive(Debug, Serialize)]
pub struct SweepReport {
    pub params:         SimParams,
    pub mean_patterns:  f64,
    pub mean_bubbles:   f64,
    /// Runs that ended with every turtle holding the same preferences.
    pub uniform_runs:   usize,
    pub runs:           Vec<SweepRun>,
}

pub fn run(params: &SimParams, palette: &Palette, seeds: Range<u64>) -> Result<SweepReport> {
    let mut runs = seeds
        .into_par_iter()
        .map(|seed| -> Result<SweepRun> {
            let mut engine = EngineBuilder::new(seed).palette(palette.clone()).build();
            engine.initialize(params.clone())?;
            let initial = engine.metrics();
            engine.run(params.max_iterations, &mut NoopObserver)?;
            let last = engine.metrics();
            debug!(seed, patterns = last.distinct_patterns, "seed finished");
            Ok(SweepRun { seed, initial, last })
        })
        .collect::<Result<Vec<_>>>()?;
    runs.sort_by_key(|r| r.seed);

    let count = runs.len().max(1) as f64;
    Ok(SweepReport {
        params:        params.clone(),
        mean_patterns: runs.iter().map(|r| r.last.distinct_patterns as f64).sum::<f64>() / count,
        mean_bubbles:  runs.iter().map(|r| r.last.bubbles as f64).sum::<f64>() / count,
        uniform_runs:  runs.iter().filter(|r| r.last.is_uniform()).count(),
        runs,
    })
}

impl SweepReport {
    pub fn print(&self) {
        println!("{:>6}  {:>9}  {:>9}  {:>8}  {:>8}", "seed", "patterns", "→", "bubbles", "largest");
        for r in &self.runs {
            println!(
                "{:>6}  {:>9}  {:>9}  {:>8}  {:>8}",
                r.seed,
                r.initial.distinct_patterns,
                r.last.distinct_patterns,
                r.last.bubbles,
                r.last.largest_bubble
            );
        }
        println!();
        println!("Mean final patterns: {:.2}", self.mean_patterns);
        println!("Mean final bubbles:  {:.2}", self.mean_bubbles);
        println!("Uniform runs:        {} / {}", self.uniform_runs, self.runs.len());
    }
}
