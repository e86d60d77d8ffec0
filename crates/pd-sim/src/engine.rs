//! The `Engine` struct: lifecycle, tick logic, and the step / run loops.

use tracing::{debug, info, trace, warn};

use pd_agent::{AgentFactory, Population};
use pd_behavior::{AxelrodRule, InteractionRule};
use pd_core::params::PROGRESS_INTERVAL;
use pd_core::traits::TRAIT_WARNING_THRESHOLD;
use pd_core::{AgentId, Arena, Palette, PdError, SimParams, SimRng, Tick, overlaps};
use pd_spatial::NeighborIndex;

use crate::{
    ConsoleLine, ConsoleLog, EngineBuilder, EngineState, PopulationMetrics, PopulationSnapshot,
    SimError, SimObserver, SimResult, TickOutcome,
};

/// A progress report produced part-way through a run.
pub(crate) struct ProgressPoint {
    /// Run-relative index of the tick just completed.
    pub index:    u64,
    pub snapshot: PopulationSnapshot,
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// The simulation engine.
///
/// `Engine<R>` exclusively owns the population and drives it through the
/// lifecycle in [`EngineState`]:
///
/// 1. **initialize**: validate parameters, generate a non-overlapping
///    population, build the neighbor index.
/// 2. **step**: a fixed batch of ticks, synchronously.
/// 3. **run**: a fixed number of ticks with a progress report after every
///    tenth tick; always runs to completion.
///
/// A tick picks a uniformly random host; if it has neighbors under the
/// search radius, picks one uniformly and lets the rule decide whether the
/// host's trait set is replaced.  Every draw comes from one seeded
/// [`SimRng`], so a seed plus a sequence of calls fully determines the
/// result.
///
/// Create via [`Engine::new`] or [`EngineBuilder`].
pub struct Engine<R: InteractionRule = AxelrodRule> {
    rule:       R,
    rng:        SimRng,
    palette:    Palette,
    state:      EngineState,
    params:     SimParams,
    arena:      Arena,
    population: Population,
    /// Built from `population` at install time; positions never change, so
    /// it stays valid until the next install.
    index:      NeighborIndex,
    tick:       Tick,
    console:    ConsoleLog,
}

impl Engine<AxelrodRule> {
    /// Engine with the default palette and the Axelrod rule.
    pub fn new(seed: u64) -> Self {
        EngineBuilder::new(seed).build()
    }
}

impl<R: InteractionRule> Engine<R> {
    pub(crate) fn from_parts(seed: u64, palette: Palette, rule: R) -> Self {
        Self {
            rule,
            rng:        SimRng::new(seed),
            palette,
            state:      EngineState::Uninitialized,
            params:     SimParams::default(),
            arena:      Arena::default(),
            population: Population::default(),
            index:      NeighborIndex::empty(),
            tick:       Tick::ZERO,
            console:    ConsoleLog::new(),
        }
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Ticks performed since the current population was installed.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Parameters of the current population (defaults before the first
    /// successful initialization).
    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn console(&self) -> &ConsoleLog {
        &self.console
    }

    /// Owned copy of the current population.
    pub fn snapshot(&self) -> PopulationSnapshot {
        PopulationSnapshot::capture(self.tick, &self.population, &self.palette)
    }

    /// Cluster statistics for the current population.
    pub fn metrics(&self) -> PopulationMetrics {
        PopulationMetrics::measure(&self.population, &self.index, self.params.search_radius)
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Generate a fresh population from `params` and make it current.
    ///
    /// Resets the console.  On failure the previous population, tick, and
    /// state are kept and the error is both logged and returned.
    pub fn initialize(&mut self, params: SimParams) -> SimResult<PopulationSnapshot> {
        self.ensure_idle("initialize")?;
        self.console.reset(ConsoleLine::info("Initializing scene..."));

        let arena = match self.validate(&params) {
            Ok(arena) => arena,
            Err(e) => return Err(self.fail_init(e)),
        };
        let factory = AgentFactory::new(arena, &self.palette);
        let population =
            match factory.populate(params.num_agents, params.num_traits, &mut self.rng) {
                Ok(p) => p,
                Err(e) => return Err(self.fail_init(e.into())),
            };

        self.install_unchecked(params, arena, population);
        self.console.push(ConsoleLine::info(format!(
            "Initialized {} turtles.",
            self.population.len()
        )));
        Ok(self.snapshot())
    }

    /// Make a hand-built population current, for scripted scenarios.
    ///
    /// `params` supplies the arena size and search radius; its agent and
    /// trait counts are taken from `population` instead.  Every bound must lie
    /// in the arena, no two bounds may overlap, the count may not exceed the
    /// arena capacity, and every trait must exist in the palette.
    pub fn install(
        &mut self,
        mut params: SimParams,
        population: Population,
    ) -> SimResult<PopulationSnapshot> {
        self.ensure_idle("install a population")?;
        self.console.reset(ConsoleLine::info("Installing scene..."));

        params.num_agents = population.len();
        params.num_traits = population
            .agents()
            .iter()
            .map(|a| a.traits.len())
            .max()
            .unwrap_or(0);

        let arena = match self.validate_install(&params, &population) {
            Ok(arena) => arena,
            Err(e) => return Err(self.fail_init(e)),
        };
        self.install_unchecked(params, arena, population);
        self.console.push(ConsoleLine::info(format!(
            "Installed {} turtles.",
            self.population.len()
        )));
        Ok(self.snapshot())
    }

    /// Perform exactly `batch` ticks.
    pub fn step(&mut self, batch: u64) -> SimResult<PopulationSnapshot> {
        self.step_with(batch, &mut crate::NoopObserver)
    }

    /// [`step`](Self::step), reporting every tick to `observer`.
    pub fn step_with<O: SimObserver>(
        &mut self,
        batch:    u64,
        observer: &mut O,
    ) -> SimResult<PopulationSnapshot> {
        self.enter(EngineState::Stepping, "step")?;

        let mut changed = 0u64;
        for _ in 0..batch {
            let outcome = self.tick_once();
            changed += u64::from(outcome.changed());
            observer.on_tick_end(&outcome);
        }

        self.state = EngineState::Initialized;
        debug!(batch, changed, tick = self.tick.0, "step complete");
        Ok(self.snapshot())
    }

    /// Perform `max_iterations` ticks, reporting progress to `observer`
    /// after run-relative ticks 0, 10, 20, …
    ///
    /// Runs to completion once started.
    pub fn run<O: SimObserver>(
        &mut self,
        max_iterations: u64,
        observer:       &mut O,
    ) -> SimResult<PopulationSnapshot> {
        self.begin_run()?;

        let mut next = 0;
        let result = loop {
            match self.run_until_progress(next, max_iterations, observer) {
                Ok(Some(point)) => {
                    observer.on_progress(point.index, &point.snapshot);
                    next = point.index + 1;
                }
                Ok(None) => break Ok(()),
                Err(e) => break Err(e),
            }
        };

        let snapshot = self.end_run();
        observer.on_run_end(self.tick, &snapshot);
        result.map(|()| snapshot)
    }

    // ── Run phases (shared with `SharedEngine`) ───────────────────────────

    pub(crate) fn begin_run(&mut self) -> SimResult<()> {
        self.enter(EngineState::Running, "run")?;
        self.console.push(ConsoleLine::info("Running simulation..."));
        Ok(())
    }

    /// Advance the current run from run-relative index `from` towards `end`,
    /// stopping right after the next progress tick.  `None` once `end` is
    /// reached without another progress tick.
    pub(crate) fn run_until_progress<O: SimObserver>(
        &mut self,
        from:     u64,
        end:      u64,
        observer: &mut O,
    ) -> SimResult<Option<ProgressPoint>> {
        if self.state != EngineState::Running {
            return Err(SimError::InvalidState {
                op:    "advance a run",
                state: self.state,
            });
        }
        for index in from..end {
            let outcome = self.tick_once();
            observer.on_tick_end(&outcome);
            if index % PROGRESS_INTERVAL == 0 {
                debug!(index, tick = self.tick.0, "run progress");
                return Ok(Some(ProgressPoint { index, snapshot: self.snapshot() }));
            }
        }
        Ok(None)
    }

    pub(crate) fn end_run(&mut self) -> PopulationSnapshot {
        if self.state == EngineState::Running {
            self.state = EngineState::Initialized;
            self.console.push(ConsoleLine::info("Simulation complete."));
        }
        self.snapshot()
    }

    /// Leave a run that was abandoned part-way (its driver was dropped).
    /// Ticks already performed are kept.
    pub(crate) fn interrupt_run(&mut self) {
        if self.state == EngineState::Running {
            self.state = EngineState::Initialized;
            self.console.push(ConsoleLine::warning(format!(
                "Simulation interrupted after {} ticks.",
                self.tick.0
            )));
        }
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    fn tick_once(&mut self) -> TickOutcome {
        let tick = self.tick;
        self.tick = tick + 1;

        let mut outcome = TickOutcome {
            tick,
            host:     AgentId::INVALID,
            neighbor: None,
            exchange: None,
        };

        let Some(h) = self.rng.index(self.population.len()) else {
            return outcome;
        };
        let host = AgentId(h as u32);
        outcome.host = host;

        let neighbors = self.index.neighbors_of(host, self.params.search_radius);
        let Some(n) = self.rng.index(neighbors.len()) else {
            return outcome;
        };
        let neighbor = neighbors[n];
        outcome.neighbor = Some(neighbor);

        let exchange = match (self.population.get(host), self.population.get(neighbor)) {
            (Some(h), Some(nb)) => self.rule.interact(h, nb, &mut self.rng),
            _ => None,
        };
        if let Some(ex) = exchange {
            match self.population.replace_traits(host, ex.traits) {
                Ok(_) => {
                    trace!(%tick, %host, %neighbor, dropped = ex.dropped.0, adopted = ex.adopted.0, "exchange");
                    outcome.exchange = Some(ex);
                }
                Err(e) => warn!(%tick, error = %e, "exchange dropped"),
            }
        }
        outcome
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn install_unchecked(&mut self, params: SimParams, arena: Arena, population: Population) {
        self.index = NeighborIndex::build(&population);
        self.population = population;
        self.arena = arena;
        self.tick = Tick::ZERO;
        self.state = EngineState::Initialized;
        info!(
            agents = self.population.len(),
            traits = params.num_traits,
            radius = params.search_radius,
            "population installed"
        );
        self.params = params;
    }

    fn fail_init(&mut self, e: SimError) -> SimError {
        self.console
            .push(ConsoleLine::error(format!("Error: Failed to initialize: {e}")));
        e
    }

    /// Reject lifecycle calls while a step or run is in flight.
    fn ensure_idle(&self, op: &'static str) -> SimResult<()> {
        if self.state.is_busy() {
            return Err(SimError::InvalidState { op, state: self.state });
        }
        Ok(())
    }

    /// Move from `Initialized` into a busy state.
    fn enter(&mut self, busy: EngineState, op: &'static str) -> SimResult<()> {
        if self.state != EngineState::Initialized {
            return Err(SimError::InvalidState { op, state: self.state });
        }
        self.state = busy;
        Ok(())
    }

    /// Hard checks first (nothing is logged unless they all pass), then the
    /// advisory warnings.
    fn validate(&mut self, params: &SimParams) -> SimResult<Arena> {
        let arena = Arena::square(params.arena_size)?;
        if params.num_agents == 0 {
            return Err(invalid("number of turtles must be at least 1"));
        }
        if params.num_agents > arena.capacity {
            return Err(PdError::Capacity {
                requested: params.num_agents,
                capacity:  arena.capacity,
            }
            .into());
        }
        if params.num_traits == 0 {
            return Err(invalid("number of features must be at least 1"));
        }
        check_common(params)?;

        if params.num_traits > TRAIT_WARNING_THRESHOLD {
            self.console.push(ConsoleLine::warning(format!(
                "Warning: Turtles are simple creatures, and like a small number of preferences. \
                 More than {TRAIT_WARNING_THRESHOLD} preferences, and some turtles will become \
                 secretive. It may be difficult to see the information they are sharing, but \
                 they are still secretly talking."
            )));
        }
        if params.num_traits > self.palette.len() {
            self.console.push(ConsoleLine::warning(format!(
                "Warning: only {} features exist; each turtle gets all of them.",
                self.palette.len()
            )));
        }
        Ok(arena)
    }

    fn validate_install(&self, params: &SimParams, population: &Population) -> SimResult<Arena> {
        let arena = Arena::square(params.arena_size)?;
        check_common(params)?;
        if population.is_empty() {
            return Err(invalid("population is empty"));
        }
        if population.len() > arena.capacity {
            return Err(PdError::Capacity {
                requested: population.len(),
                capacity:  arena.capacity,
            }
            .into());
        }
        let palette_mask = if self.palette.len() >= 32 {
            u32::MAX
        } else {
            (1u32 << self.palette.len()) - 1
        };
        let agents = population.agents();
        for (id, agent) in population.iter() {
            if !arena.contains(agent.bound) {
                return Err(invalid(format!("{id} lies outside the arena")));
            }
            if agent.traits.0 & !palette_mask != 0 {
                return Err(invalid(format!("{id} holds a trait outside the palette")));
            }
            if let Some(j) = agents[..id.index()].iter().position(|o| overlaps(o.bound, agent.bound)) {
                return Err(invalid(format!("{id} overlaps AgentId({j})")));
            }
        }
        Ok(arena)
    }
}

fn check_common(params: &SimParams) -> SimResult<()> {
    if !(params.search_radius.is_finite() && params.search_radius >= 0.0) {
        return Err(invalid(format!(
            "search radius must be a non-negative number, got {}",
            params.search_radius
        )));
    }
    if params.max_iterations == 0 || params.step_batch_size == 0 {
        return Err(invalid("iteration counts must be at least 1"));
    }
    Ok(())
}

fn invalid(msg: impl Into<String>) -> SimError {
    PdError::InvalidParameter(msg.into()).into()
}
