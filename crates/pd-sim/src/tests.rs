//! Integration tests for pd-sim.

use pd_agent::{Population, PopulationBuilder};
use pd_core::{AgentId, Arena, Palette, Point, SimParams, TraitSet};

use crate::{Engine, EngineBuilder, PopulationSnapshot, SimObserver, TickOutcome};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn params(n: usize, m: usize) -> SimParams {
    SimParams { num_agents: n, num_traits: m, ..SimParams::default() }
}

fn abcd() -> Palette {
    Palette::new(["A", "B", "C", "D"]).unwrap()
}

/// Agents 0 {A,B} and 1 {B,C} two units apart; agent 2 {C,D} far away.
fn scenario(palette: &Palette) -> Population {
    PopulationBuilder::new(Arena::default())
        .agent(Point::new(100.0, 100.0), palette.set_of(["A", "B"]).unwrap())
        .agent(Point::new(150.0, 100.0), palette.set_of(["B", "C"]).unwrap())
        .agent(Point::new(400.0, 400.0), palette.set_of(["C", "D"]).unwrap())
        .build()
        .unwrap()
}

#[derive(Default)]
struct Recorder {
    outcomes: Vec<TickOutcome>,
    progress: Vec<u64>,
    ends:     usize,
}

impl SimObserver for Recorder {
    fn on_tick_end(&mut self, outcome: &TickOutcome) {
        self.outcomes.push(*outcome);
    }

    fn on_progress(&mut self, index: u64, _snapshot: &PopulationSnapshot) {
        self.progress.push(index);
    }

    fn on_run_end(&mut self, _final_tick: pd_core::Tick, _snapshot: &PopulationSnapshot) {
        self.ends += 1;
    }
}

// ── Initialization ────────────────────────────────────────────────────────────

#[cfg(test)]
mod initialize_tests {
    use pd_core::{PdError, overlaps};

    use super::*;
    use crate::{EngineState, Severity, SimError};

    #[test]
    fn produces_requested_population() {
        let mut engine = Engine::new(1);
        let snap = engine.initialize(params(30, 5)).unwrap();
        assert_eq!(snap.len(), 30);
        assert_eq!(snap.tick.0, 0);
        assert_eq!(engine.state(), EngineState::Initialized);
        for (_, view) in snap.iter() {
            assert_eq!(view.traits.len(), 5);
        }
    }

    #[test]
    fn agents_never_overlap_and_stay_in_arena() {
        for seed in 0..5 {
            let mut engine = Engine::new(seed);
            engine.initialize(params(50, 3)).unwrap();
            let agents = engine.population().agents();
            for (i, a) in agents.iter().enumerate() {
                assert!(engine.arena().contains(a.bound));
                for b in &agents[i + 1..] {
                    assert!(!overlaps(a.bound, b.bound), "seed {seed}");
                }
            }
        }
    }

    #[test]
    fn over_capacity_is_rejected_and_logged() {
        let mut engine = Engine::new(1);
        let err = engine.initialize(params(51, 5)).unwrap_err();
        assert!(matches!(
            err,
            SimError::Core(PdError::Capacity { requested: 51, capacity: 50 })
        ));
        assert_eq!(engine.state(), EngineState::Uninitialized);
        let last = engine.console().last().unwrap();
        assert_eq!(last.severity, Severity::Error);
        assert!(last.text.contains("not big enough"));
    }

    #[test]
    fn failure_keeps_previous_population() {
        let mut engine = Engine::new(2);
        engine.initialize(params(20, 3)).unwrap();
        engine.step(5).unwrap();
        assert!(engine.initialize(params(0, 3)).is_err());
        assert_eq!(engine.state(), EngineState::Initialized);
        assert_eq!(engine.population().len(), 20);
        assert_eq!(engine.tick().0, 5);
    }

    #[test]
    fn rejects_bad_numbers() {
        let mut engine = Engine::new(3);
        assert!(engine.initialize(params(10, 0)).is_err());
        let mut p = params(10, 2);
        p.search_radius = -1.0;
        assert!(engine.initialize(p.clone()).is_err());
        p.search_radius = f32::NAN;
        assert!(engine.initialize(p).is_err());
        let mut p = params(10, 2);
        p.step_batch_size = 0;
        assert!(engine.initialize(p).is_err());
    }

    #[test]
    fn many_traits_warns_but_succeeds() {
        let mut engine = Engine::new(4);
        engine.initialize(params(10, 6)).unwrap();
        let warnings: Vec<_> = engine.console().at_least(Severity::Warning).collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].text.starts_with("Warning: Turtles are simple creatures"));
    }

    #[test]
    fn traits_beyond_palette_are_capped() {
        let mut engine = EngineBuilder::new(4).palette(abcd()).build();
        let snap = engine.initialize(params(5, 9)).unwrap();
        for (_, view) in snap.iter() {
            assert_eq!(view.traits.len(), 4);
        }
        assert_eq!(engine.console().at_least(Severity::Warning).count(), 2);
    }

    #[test]
    fn console_is_reset_per_initialization() {
        let mut engine = Engine::new(5);
        engine.initialize(params(10, 2)).unwrap();
        engine.initialize(params(12, 2)).unwrap();
        let texts: Vec<_> = engine.console().lines().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Initializing scene...", "Initialized 12 turtles."]);
    }

    #[test]
    fn same_seed_same_population() {
        let mut a = Engine::new(99);
        let mut b = Engine::new(99);
        assert_eq!(a.initialize(params(40, 4)).unwrap(), b.initialize(params(40, 4)).unwrap());
    }
}

// ── Stepping and running ──────────────────────────────────────────────────────

#[cfg(test)]
mod step_tests {
    use super::*;
    use crate::{EngineState, NoopObserver, SimError};

    #[test]
    fn step_before_initialize_is_rejected() {
        let mut engine = Engine::new(1);
        let err = engine.step(1).unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidState { state: EngineState::Uninitialized, .. }
        ));
        assert!(engine.run(10, &mut NoopObserver).is_err());
    }

    #[test]
    fn step_advances_exactly_batch_ticks() {
        let mut engine = Engine::new(1);
        engine.initialize(params(20, 3)).unwrap();
        let mut rec = Recorder::default();
        let snap = engine.step_with(7, &mut rec).unwrap();
        assert_eq!(snap.tick.0, 7);
        assert_eq!(rec.outcomes.len(), 7);
        assert!(rec.progress.is_empty());
        engine.step(0).unwrap();
        assert_eq!(engine.tick().0, 7);
        assert_eq!(engine.state(), EngineState::Initialized);
    }

    #[test]
    fn run_reports_every_tenth_tick() {
        let mut engine = Engine::new(2);
        engine.initialize(params(20, 3)).unwrap();
        let mut rec = Recorder::default();
        let snap = engine.run(100, &mut rec).unwrap();
        assert_eq!(snap.tick.0, 100);
        assert_eq!(rec.progress, (0..100).step_by(10).collect::<Vec<_>>());
        assert_eq!(rec.ends, 1);

        let mut rec = Recorder::default();
        engine.run(15, &mut rec).unwrap();
        assert_eq!(rec.progress, vec![0, 10]);
        assert_eq!(engine.tick().0, 115);
        assert_eq!(engine.console().last().unwrap().text, "Simulation complete.");
    }

    #[test]
    fn trait_set_size_is_preserved() {
        let mut engine = Engine::new(3);
        engine.initialize(params(40, 4)).unwrap();
        let snap = engine.step(500).unwrap();
        for (_, view) in snap.iter() {
            assert_eq!(view.traits.len(), 4);
        }
    }

    #[test]
    fn positions_never_change() {
        let mut engine = Engine::new(4);
        let before = engine.initialize(params(25, 3)).unwrap();
        let after = engine.step(300).unwrap();
        for (id, view) in before.iter() {
            assert_eq!(after.get(id).unwrap().position, view.position);
        }
    }

    #[test]
    fn same_seed_same_trajectory() {
        let run = |seed| {
            let mut engine = Engine::new(seed);
            engine.initialize(params(30, 5)).unwrap();
            engine.step(20).unwrap();
            engine.run(80, &mut NoopObserver).unwrap()
        };
        assert_eq!(run(11), run(11));
    }

    #[test]
    fn snapshot_does_not_alias_engine() {
        let mut engine = Engine::new(5);
        let first = engine.initialize(params(30, 3)).unwrap();
        let copy = first.clone();
        engine.step(200).unwrap();
        assert_eq!(first, copy);
    }
}

// ── Scripted scenarios ────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use pd_agent::Agent;
    use pd_core::PdError;

    use super::*;
    use crate::{EngineState, NoopObserver, PopulationMetrics, SimError};

    #[test]
    fn partial_overlap_host_converges_toward_neighbor() {
        let palette = abcd();
        let b_c = palette.set_of(["B", "C"]).unwrap();
        let a_b = palette.set_of(["A", "B"]).unwrap();
        let c_d = palette.set_of(["C", "D"]).unwrap();
        let mut host_zero_seen = false;

        for seed in 0..40 {
            let mut engine = EngineBuilder::new(seed).palette(palette.clone()).build();
            engine.install(SimParams::default(), scenario(&palette)).unwrap();
            let mut rec = Recorder::default();
            let snap = engine.step_with(1, &mut rec).unwrap();
            let outcome = rec.outcomes[0];

            match outcome.host {
                AgentId(0) => {
                    host_zero_seen = true;
                    assert_eq!(outcome.neighbor, Some(AgentId(1)));
                    assert_eq!(snap.get(AgentId(0)).unwrap().traits, b_c);
                    assert_eq!(snap.labels(AgentId(0)).unwrap(), vec!["B", "C"]);
                }
                AgentId(1) => {
                    assert_eq!(snap.get(AgentId(1)).unwrap().traits, a_b);
                }
                _ => {
                    assert_eq!(outcome.neighbor, None);
                    assert!(!outcome.changed());
                }
            }
            // The far agent and the neighbor side never change on one tick.
            assert_eq!(snap.get(AgentId(2)).unwrap().traits, c_d);
        }
        assert!(host_zero_seen);
    }

    #[test]
    fn zero_radius_means_no_interactions() {
        let palette = abcd();
        let mut engine = EngineBuilder::new(8).palette(palette.clone()).build();
        let p = SimParams { search_radius: 0.0, ..SimParams::default() };
        let before = engine.install(p, scenario(&palette)).unwrap();
        let mut rec = Recorder::default();
        let after = engine.step_with(50, &mut rec).unwrap();
        assert!(rec.outcomes.iter().all(|o| o.neighbor.is_none()));
        assert_eq!(before.agents, after.agents);
    }

    #[test]
    fn identical_neighbors_never_change() {
        let palette = abcd();
        let same = palette.set_of(["A", "B"]).unwrap();
        let population = PopulationBuilder::new(Arena::default())
            .agent(Point::new(100.0, 100.0), same)
            .agent(Point::new(150.0, 100.0), same)
            .build()
            .unwrap();
        let mut engine = EngineBuilder::new(1).palette(palette).build();
        engine.install(SimParams::default(), population).unwrap();
        let snap = engine.run(50, &mut NoopObserver).unwrap();
        assert!(snap.iter().all(|(_, v)| v.traits == same));
    }

    #[test]
    fn install_rejects_foreign_traits() {
        let palette = abcd();
        let outside = TraitSet::from_iter([pd_core::TraitId(7)]);
        let population = PopulationBuilder::new(Arena::default())
            .agent(Point::new(100.0, 100.0), outside)
            .build()
            .unwrap();
        let mut engine = EngineBuilder::new(1).palette(palette).build();
        assert!(matches!(
            engine.install(SimParams::default(), population),
            Err(SimError::Core(_))
        ));
        assert_eq!(engine.state(), EngineState::Uninitialized);
    }

    #[test]
    fn install_rejects_overlapping_agents() {
        let palette = abcd();
        let traits = palette.set_of(["A", "B"]).unwrap();
        let population = Population::from_agents(vec![
            Agent::new(Point::new(100.0, 100.0), 24.0, traits),
            Agent::new(Point::new(100.0, 100.0), 24.0, traits),
        ]);
        let mut engine = EngineBuilder::new(1).palette(palette).build();
        let err = engine.install(SimParams::default(), population).unwrap_err();
        assert!(err.to_string().contains("overlaps"));
        assert_eq!(engine.state(), EngineState::Uninitialized);
    }

    #[test]
    fn install_rejects_more_than_capacity() {
        let palette = abcd();
        let traits = palette.set_of(["A"]).unwrap();
        // Three disjoint agents in an arena whose capacity is two.
        let population = Population::from_agents(vec![
            Agent::new(Point::new(24.0, 24.0), 24.0, traits),
            Agent::new(Point::new(76.0, 24.0), 24.0, traits),
            Agent::new(Point::new(24.0, 76.0), 24.0, traits),
        ]);
        let mut engine = EngineBuilder::new(1).palette(palette).build();
        let p = SimParams { arena_size: 100.0, ..SimParams::default() };
        assert!(matches!(
            engine.install(p.clone(), population.clone()),
            Err(SimError::Core(PdError::Capacity { requested: 3, capacity: 2 }))
        ));
        assert_eq!(engine.state(), EngineState::Uninitialized);

        let fits = Population::from_agents(population.agents()[..2].to_vec());
        assert_eq!(engine.install(p, fits).unwrap().len(), 2);
    }

    #[test]
    fn smallest_arena_takes_one_turtle() {
        let mut engine = Engine::new(6);
        let p = SimParams { arena_size: 60.0, ..params(1, 2) };
        assert_eq!(engine.initialize(p.clone()).unwrap().len(), 1);
        assert!(engine.initialize(SimParams { num_agents: 2, ..p }).is_err());
    }

    #[test]
    fn metrics_count_bubbles_and_isolates() {
        let palette = abcd();
        let mut engine = EngineBuilder::new(1).palette(palette.clone()).build();
        engine.install(SimParams::default(), scenario(&palette)).unwrap();
        let m = engine.metrics();
        assert_eq!(m.agents, 3);
        assert_eq!(m.distinct_patterns, 3);
        assert_eq!(m.distinct_traits, 4);
        assert_eq!(m.bubbles, 0);
        assert_eq!(m.largest_bubble, 0);
        assert_eq!(m.isolated, 1);

        // One exchange makes the close pair identical.
        for _ in 0..200 {
            engine.step(1).unwrap();
            if engine.metrics().bubbles == 1 {
                break;
            }
        }
        let m = engine.metrics();
        assert_eq!(m.bubbles, 1);
        assert_eq!(m.largest_bubble, 2);
        assert_eq!(m.distinct_patterns, 2);
        assert_eq!(m, PopulationMetrics::of(engine.population(), 50.0));
    }

    #[test]
    fn bubbles_join_through_chains() {
        let palette = abcd();
        let ab = palette.set_of(["A", "B"]).unwrap();
        let cd = palette.set_of(["C", "D"]).unwrap();
        // Four A/B turtles in a row: only adjacent ones are in range, yet
        // they form one bubble.  A C/D pair below, one loner off to the side.
        let population = PopulationBuilder::new(Arena::default())
            .agent(Point::new(100.0, 100.0), ab)
            .agent(Point::new(160.0, 100.0), ab)
            .agent(Point::new(220.0, 100.0), ab)
            .agent(Point::new(280.0, 100.0), ab)
            .agent(Point::new(100.0, 400.0), cd)
            .agent(Point::new(160.0, 400.0), cd)
            .agent(Point::new(420.0, 250.0), ab)
            .build()
            .unwrap();

        let m = PopulationMetrics::of(&population, 50.0);
        assert_eq!(m.bubbles, 2);
        assert_eq!(m.largest_bubble, 4);
        assert_eq!(m.isolated, 1);
        assert_eq!(m.distinct_patterns, 2);

        // With no reach at all the row falls apart.
        let m = PopulationMetrics::of(&population, 0.0);
        assert_eq!(m.bubbles, 0);
        assert_eq!(m.isolated, 7);
    }
}

// ── Shared engine ─────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "async"))]
mod shared_tests {
    use std::time::Duration;

    use super::*;
    use crate::{EngineState, SharedEngine, SimError};

    fn rejected_as_running<T>(r: Result<T, SimError>) -> bool {
        matches!(r, Err(SimError::InvalidState { state: EngineState::Running, .. }))
    }

    #[tokio::test]
    async fn progress_callback_cannot_reenter() {
        let shared = SharedEngine::new(Engine::new(6));
        shared.initialize(params(30, 5)).unwrap();

        let handle = shared.clone();
        let mut rejected = 0;
        let mut reports = Vec::new();
        let snap = shared
            .run(100, |index, snapshot| {
                reports.push(index);
                assert_eq!(snapshot.tick.0, index + 1);
                if rejected_as_running(handle.step(1)) {
                    rejected += 1;
                }
                assert!(rejected_as_running(handle.initialize(params(5, 2))));
                // Reads stay available.
                assert_eq!(handle.snapshot().unwrap().len(), 30);
            })
            .await
            .unwrap();

        assert_eq!(rejected, 10);
        assert_eq!(reports.len(), 10);
        assert_eq!(snap.tick.0, 100);
        assert_eq!(shared.state().unwrap(), EngineState::Initialized);
    }

    #[tokio::test]
    async fn concurrent_task_is_rejected_mid_run() {
        let shared = SharedEngine::new(Engine::new(7)).with_frame_delay(Duration::from_millis(20));
        shared.initialize(params(20, 3)).unwrap();

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let runner = shared.clone();
        let task = tokio::spawn(async move {
            runner
                .run(50, move |index, _| {
                    let _ = tx.send(index);
                })
                .await
        });

        assert_eq!(rx.recv().await, Some(0));
        assert_eq!(shared.state().unwrap(), EngineState::Running);
        assert!(rejected_as_running(shared.step(1)));

        let snap = task.await.unwrap().unwrap();
        assert_eq!(snap.tick.0, 50);
        assert!(shared.step(1).is_ok());
        assert_eq!(shared.snapshot().unwrap().tick.0, 51);
    }

    #[tokio::test]
    async fn timed_out_run_releases_engine() {
        let shared = SharedEngine::new(Engine::new(9)).with_frame_delay(Duration::from_millis(50));
        shared.initialize(params(20, 3)).unwrap();

        let cut = tokio::time::timeout(Duration::from_millis(10), shared.run(100, |_, _| {})).await;
        assert!(cut.is_err());

        assert_eq!(shared.state().unwrap(), EngineState::Initialized);
        // Only the chunk up to run-relative tick 0 was performed.
        assert_eq!(shared.snapshot().unwrap().tick.0, 1);
        let console = shared.console().unwrap();
        assert_eq!(console.last().unwrap().text, "Simulation interrupted after 1 ticks.");

        assert!(shared.step(1).is_ok());
        assert!(shared.initialize(params(10, 2)).is_ok());
    }

    #[tokio::test]
    async fn panicking_callback_releases_engine() {
        let shared = SharedEngine::new(Engine::new(10));
        shared.initialize(params(20, 3)).unwrap();

        let runner = shared.clone();
        let task = tokio::spawn(async move {
            runner.run(50, |index, _| panic!("callback failed at {index}")).await
        });
        assert!(task.await.unwrap_err().is_panic());

        assert_eq!(shared.state().unwrap(), EngineState::Initialized);
        assert!(shared.run(20, |_, _| {}).await.is_ok());
    }

    #[tokio::test]
    async fn aborted_task_releases_engine() {
        let shared = SharedEngine::new(Engine::new(11)).with_frame_delay(Duration::from_millis(50));
        shared.initialize(params(20, 3)).unwrap();

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let runner = shared.clone();
        let task = tokio::spawn(async move {
            runner
                .run(100, move |index, _| {
                    let _ = tx.send(index);
                })
                .await
        });
        assert_eq!(rx.recv().await, Some(0));
        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());

        assert_eq!(shared.state().unwrap(), EngineState::Initialized);
        assert!(shared.step(1).is_ok());
    }

    #[tokio::test]
    async fn engine_is_readable_through_handle() {
        let shared = SharedEngine::new(Engine::new(12));
        shared.initialize(params(30, 4)).unwrap();
        let (agents, state) = shared
            .with_engine(|e| (e.params().num_agents, e.state()))
            .unwrap();
        assert_eq!(agents, 30);
        assert_eq!(state, EngineState::Initialized);
    }

    #[tokio::test]
    async fn run_matches_plain_engine() {
        let shared = SharedEngine::new(Engine::new(8));
        shared.initialize(params(30, 4)).unwrap();
        let a = shared.run(60, |_, _| {}).await.unwrap();

        let mut engine = Engine::new(8);
        engine.initialize(params(30, 4)).unwrap();
        let b = engine.run(60, &mut crate::NoopObserver).unwrap();
        assert_eq!(a, b);
    }
}
