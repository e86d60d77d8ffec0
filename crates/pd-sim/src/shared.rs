//! Thread-safe engine handle for interactive callers.
//!
//! A continuous run on a plain [`Engine`] holds `&mut` for its whole length,
//! so nothing else can even ask the engine a question until it finishes.
//! [`SharedEngine`] takes the lock only for each chunk of ticks between
//! progress reports and yields to the tokio scheduler in between.  Other
//! callers (a control panel, the progress callback itself) can read
//! snapshots meanwhile, and any lifecycle call they make is rejected with
//! [`SimError::InvalidState`] because the engine is `Running`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use pd_behavior::{AxelrodRule, InteractionRule};
use pd_core::SimParams;

use crate::{
    ConsoleLine, Engine, EngineState, NoopObserver, PopulationMetrics, PopulationSnapshot,
    SimError, SimResult,
};

/// Cloneable handle to one engine.
pub struct SharedEngine<R: InteractionRule = AxelrodRule> {
    inner:       Arc<Mutex<Engine<R>>>,
    /// Pause after every progress report; `None` only yields.
    frame_delay: Option<Duration>,
}

impl<R: InteractionRule> Clone for SharedEngine<R> {
    fn clone(&self) -> Self {
        Self {
            inner:       Arc::clone(&self.inner),
            frame_delay: self.frame_delay,
        }
    }
}

impl<R: InteractionRule> SharedEngine<R> {
    pub fn new(engine: Engine<R>) -> Self {
        Self { inner: Arc::new(Mutex::new(engine)), frame_delay: None }
    }

    /// Sleep `delay` after each progress report, pacing a visual run.
    pub fn with_frame_delay(mut self, delay: Duration) -> Self {
        self.frame_delay = Some(delay);
        self
    }

    fn lock(&self) -> SimResult<MutexGuard<'_, Engine<R>>> {
        self.inner.lock().map_err(|_| SimError::Poisoned)
    }

    pub fn initialize(&self, params: SimParams) -> SimResult<PopulationSnapshot> {
        self.lock()?.initialize(params)
    }

    pub fn step(&self, batch: u64) -> SimResult<PopulationSnapshot> {
        self.lock()?.step(batch)
    }

    pub fn state(&self) -> SimResult<EngineState> {
        Ok(self.lock()?.state())
    }

    pub fn snapshot(&self) -> SimResult<PopulationSnapshot> {
        Ok(self.lock()?.snapshot())
    }

    pub fn metrics(&self) -> SimResult<PopulationMetrics> {
        Ok(self.lock()?.metrics())
    }

    /// Copy of the console lines.
    pub fn console(&self) -> SimResult<Vec<ConsoleLine>> {
        Ok(self.lock()?.console().lines().to_vec())
    }

    /// Read anything else off the engine under the lock.
    pub fn with_engine<T>(&self, f: impl FnOnce(&Engine<R>) -> T) -> SimResult<T> {
        let engine = self.lock()?;
        Ok(f(&engine))
    }

    /// Run `max_iterations` ticks, calling `on_progress(index, snapshot)`
    /// after run-relative ticks 0, 10, 20, …
    ///
    /// The lock is released while `on_progress` runs and across every await
    /// point, so the callback may call back into this handle.
    ///
    /// Dropping the returned future part-way (a timeout, `select!`, an
    /// aborted task, a panic in `on_progress`) ends the run where it stopped
    /// and returns the engine to `Initialized`.
    pub async fn run<F>(&self, max_iterations: u64, mut on_progress: F) -> SimResult<PopulationSnapshot>
    where
        F: FnMut(u64, &PopulationSnapshot),
    {
        self.lock()?.begin_run()?;
        let mut guard = RunGuard { engine: &self.inner, armed: true };

        let mut next = 0;
        let result = loop {
            let chunk = self
                .lock()
                .and_then(|mut engine| engine.run_until_progress(next, max_iterations, &mut NoopObserver));
            match chunk {
                Ok(Some(point)) => {
                    on_progress(point.index, &point.snapshot);
                    next = point.index + 1;
                }
                Ok(None) => break Ok(()),
                Err(e) => break Err(e),
            }
            match self.frame_delay {
                Some(delay) => tokio::time::sleep(delay).await,
                None => tokio::task::yield_now().await,
            }
        };

        let snapshot = self.lock()?.end_run();
        guard.armed = false;
        result.map(|()| snapshot)
    }
}

/// Releases the `Running` state if a run future is dropped before it
/// finishes.
struct RunGuard<'a, R: InteractionRule> {
    engine: &'a Mutex<Engine<R>>,
    armed:  bool,
}

impl<R: InteractionRule> Drop for RunGuard<'_, R> {
    fn drop(&mut self) {
        if self.armed {
            // A poisoned lock still holds a usable engine; the run must end
            // either way.
            let mut engine = self.engine.lock().unwrap_or_else(PoisonError::into_inner);
            engine.interrupt_run();
        }
    }
}
