//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `agent_snapshots.csv`
//! - `tick_log.csv`

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};

pub const SNAPSHOT_FILE: &str = "agent_snapshots.csv";
pub const TICK_LOG_FILE: &str = "tick_log.csv";

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    ticks:     Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open both files, and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut snapshots = Writer::from_path(dir.join(SNAPSHOT_FILE))?;
        snapshots.write_record(["tick", "agent_id", "x", "y", "traits"])?;

        let mut ticks = Writer::from_path(dir.join(TICK_LOG_FILE))?;
        ticks.write_record(["tick", "host", "neighbor", "changed"])?;

        Ok(Self { snapshots, ticks, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.agent_id.to_string(),
                format!("{:.2}", row.x),
                format!("{:.2}", row.y),
                row.traits.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        let neighbor = if row.neighbor == u32::MAX {
            String::new()
        } else {
            row.neighbor.to_string()
        };
        self.ticks.write_record(&[
            row.tick.to_string(),
            row.host.to_string(),
            neighbor,
            (row.changed as u8).to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.ticks.flush()?;
        Ok(())
    }
}
