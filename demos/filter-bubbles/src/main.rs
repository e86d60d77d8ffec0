//! filter-bubbles — command-line driver for the preference dispersion model.
//!
//! Turtles with a handful of colored preferences sit in a square arena and
//! swap preferences with whoever is close by.  Neighbors that share some but
//! not all preferences drift together; the population splits into uniform
//! bubbles that no longer hear anything new.
//!
//! ```text
//! filter-bubbles run   --agents 40 --traits 4 --iterations 2000 --output ./trace
//! filter-bubbles run   --params params.json --frame-ms 30
//! filter-bubbles sweep --seeds 64 --iterations 5000 --output sweep.json
//! ```

mod sweep;

use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pd_core::{Palette, SimParams};
use pd_output::{CsvWriter, OutputWriter, SimOutputObserver};
use pd_sim::{
    Engine, EngineBuilder, PopulationMetrics, PopulationSnapshot, SharedEngine, SimObserver,
    TickOutcome,
};

#[derive(Parser)]
#[command(name = "filter-bubbles")]
#[command(about = "Preference dispersion (filter bubble) simulation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize one population and run it.
    Run {
        #[command(flatten)]
        params: ParamArgs,
        /// Random seed
        #[arg(long, env = "PD_SEED", default_value = "42")]
        seed: u64,
        /// Ticks performed by `step` before the run, repeated this many times
        #[arg(long, default_value = "0")]
        steps: u64,
        /// Pause between progress reports in milliseconds; non-zero runs
        /// the paced (shared) engine
        #[arg(long, default_value = "0")]
        frame_ms: u64,
        /// Directory for the CSV trace
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write the final population as JSON
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },

    /// Run many seeds in parallel and report how the population converged.
    Sweep {
        #[command(flatten)]
        params: ParamArgs,
        /// Number of seeds, starting at `first-seed`
        #[arg(long, default_value = "32")]
        seeds: u64,
        #[arg(long, default_value = "0")]
        first_seed: u64,
        /// Output file for results (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Simulation parameters: a JSON file, then flag overrides.
#[derive(Args, Clone)]
struct ParamArgs {
    /// JSON file with any subset of the parameter fields
    #[arg(long)]
    params: Option<PathBuf>,
    /// Number of turtles
    #[arg(short = 'n', long)]
    agents: Option<usize>,
    /// Preferences per turtle
    #[arg(short = 'm', long)]
    traits: Option<usize>,
    /// Search radius
    #[arg(short, long)]
    radius: Option<f32>,
    /// Ticks per run
    #[arg(short = 'k', long)]
    iterations: Option<u64>,
    /// Ticks per step
    #[arg(long)]
    batch: Option<u64>,
    /// Arena side length
    #[arg(long)]
    arena: Option<f32>,
    /// Comma-separated trait labels replacing the default colors
    #[arg(long, value_delimiter = ',')]
    palette: Option<Vec<String>>,
}

impl ParamArgs {
    fn resolve(&self) -> Result<(SimParams, Palette)> {
        let mut params = match &self.params {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("opening params file {}", path.display()))?;
                serde_json::from_reader(file)
                    .with_context(|| format!("parsing params file {}", path.display()))?
            }
            None => SimParams::default(),
        };
        if let Some(n) = self.agents {
            params.num_agents = n;
        }
        if let Some(m) = self.traits {
            params.num_traits = m;
        }
        if let Some(r) = self.radius {
            params.search_radius = r;
        }
        if let Some(k) = self.iterations {
            params.max_iterations = k;
        }
        if let Some(b) = self.batch {
            params.step_batch_size = b;
        }
        if let Some(a) = self.arena {
            params.arena_size = a;
        }
        let palette = match &self.palette {
            Some(labels) => Palette::new(labels.iter().map(|l| l.trim()))?,
            None => Palette::default(),
        };
        Ok((params, palette))
    }
}

// ── Progress printing ─────────────────────────────────────────────────────────

/// Prints a one-line status every progress report and forwards everything to
/// the CSV observer, if any.
struct ConsoleObserver<W: OutputWriter> {
    trace:   Option<SimOutputObserver<W>>,
    changes: u64,
}

impl<W: OutputWriter> SimObserver for ConsoleObserver<W> {
    fn on_tick_end(&mut self, outcome: &TickOutcome) {
        self.changes += u64::from(outcome.changed());
        if let Some(t) = &mut self.trace {
            t.on_tick_end(outcome);
        }
    }

    fn on_progress(&mut self, index: u64, snapshot: &PopulationSnapshot) {
        if index % 100 == 0 {
            print_progress(index, snapshot);
        }
        if let Some(t) = &mut self.trace {
            t.on_progress(index, snapshot);
        }
    }

    fn on_run_end(&mut self, final_tick: pd_core::Tick, snapshot: &PopulationSnapshot) {
        if let Some(t) = &mut self.trace {
            t.on_run_end(final_tick, snapshot);
        }
    }
}

fn print_progress(index: u64, snapshot: &PopulationSnapshot) {
    let patterns: BTreeSet<_> = snapshot.iter().map(|(_, v)| v.traits).collect();
    println!("  tick {:>6}  |  {:>3} distinct patterns", index, patterns.len());
}

fn print_metrics(m: &PopulationMetrics) {
    println!("Turtles:           {}", m.agents);
    println!("Distinct patterns: {}", m.distinct_patterns);
    println!("Distinct traits:   {}", m.distinct_traits);
    println!("Bubbles:           {} (largest {})", m.bubbles, m.largest_bubble);
    println!("Isolated:          {}", m.isolated);
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)?;
    Ok(())
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_blocking(
    mut engine: Engine,
    params: &SimParams,
    steps: u64,
    output: Option<&Path>,
) -> Result<(PopulationSnapshot, PopulationMetrics)> {
    let initial = engine.initialize(params.clone())?;
    let mut trace = output
        .map(|dir| CsvWriter::new(dir).map(SimOutputObserver::new))
        .transpose()?;
    if let Some(t) = &mut trace {
        t.record(&initial);
    }
    let mut observer = ConsoleObserver { trace, changes: 0 };

    for _ in 0..steps {
        engine.step_with(params.step_batch_size, &mut observer)?;
    }
    let last = engine.run(params.max_iterations, &mut observer)?;
    info!(changes = observer.changes, tick = last.tick.0, "run finished");

    if let Some(mut t) = observer.trace.take() {
        if let Some(e) = t.take_error() {
            bail!("writing trace: {e}");
        }
    }
    Ok((last, engine.metrics()))
}

async fn run_paced(
    engine: Engine,
    params: &SimParams,
    steps: u64,
    frame: Duration,
) -> Result<(PopulationSnapshot, PopulationMetrics)> {
    let shared = SharedEngine::new(engine).with_frame_delay(frame);
    shared.initialize(params.clone())?;
    for _ in 0..steps {
        shared.step(params.step_batch_size)?;
    }
    let last = shared
        .run(params.max_iterations, |index, snapshot| {
            if index % 100 == 0 {
                print_progress(index, snapshot);
            }
        })
        .await?;
    Ok((last, shared.metrics()?))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Run { params, seed, steps, frame_ms, output, snapshot } => {
            let (params, palette) = params.resolve()?;
            println!("=== filter-bubbles ===");
            println!(
                "Turtles: {}  |  Preferences: {}  |  Radius: {}  |  Ticks: {}  |  Seed: {seed}",
                params.num_agents, params.num_traits, params.search_radius, params.max_iterations
            );

            let engine = EngineBuilder::new(seed).palette(palette).build();
            let started = Instant::now();
            let (last, metrics) = if frame_ms > 0 {
                if output.is_some() {
                    bail!("--output is not supported together with --frame-ms");
                }
                run_paced(engine, &params, steps, Duration::from_millis(frame_ms)).await?
            } else {
                run_blocking(engine, &params, steps, output.as_deref())?
            };

            println!();
            println!("=== Complete in {:.2?} ===", started.elapsed());
            print_metrics(&metrics);
            if let Some(path) = snapshot {
                write_json(&path, &last)?;
                println!("Snapshot written to {}", path.display());
            }
            if let Some(dir) = output {
                println!("Trace written to {}", dir.display());
            }
        }

        Commands::Sweep { params, seeds, first_seed, output } => {
            let (params, palette) = params.resolve()?;
            let started = Instant::now();
            let report = sweep::run(&params, &palette, first_seed..first_seed + seeds)?;
            println!("=== Sweep of {seeds} seeds in {:.2?} ===", started.elapsed());
            report.print();
            if let Some(path) = output {
                write_json(&path, &report)?;
                println!("Results written to {}", path.display());
            }
        }
    }

    Ok(())
}
