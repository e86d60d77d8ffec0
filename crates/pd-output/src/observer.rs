//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use pd_core::Tick;
use pd_sim::{PopulationSnapshot, SimObserver, TickOutcome};

use crate::row::{AgentSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes a trace to any [`OutputWriter`].
///
/// - every tick → one tick-log row (unless disabled)
/// - every progress report → one snapshot row per agent
/// - end of run → the final snapshot, then the writer is finished
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After the run returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    tick_log:   bool,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, tick_log: true, last_error: None }
    }

    /// Skip per-tick rows; only snapshots are written.
    pub fn without_tick_log(mut self) -> Self {
        self.tick_log = false;
        self
    }

    /// Write `snapshot` directly, e.g. the population right after
    /// initialization.
    pub fn record(&mut self, snapshot: &PopulationSnapshot) {
        let rows = AgentSnapshotRow::from_snapshot(snapshot);
        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    /// Take the stored write error (if any) after the run returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer when no run will end it (after `step_with`).
    pub fn finish(&mut self) -> OutputResult<()> {
        self.writer.finish()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, outcome: &TickOutcome) {
        if self.tick_log {
            let result = self.writer.write_tick_summary(&TickSummaryRow::from(outcome));
            self.store_err(result);
        }
    }

    fn on_progress(&mut self, _index: u64, snapshot: &PopulationSnapshot) {
        self.record(snapshot);
    }

    fn on_run_end(&mut self, _final_tick: Tick, snapshot: &PopulationSnapshot) {
        self.record(snapshot);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
