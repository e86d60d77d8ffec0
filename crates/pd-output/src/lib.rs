//! `pd-output` — simulation trace writers.
//!
//! | Backend | Files created                          |
//! |---------|----------------------------------------|
//! | CSV     | `agent_snapshots.csv`, `tick_log.csv`  |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `pd_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pd_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! obs.record(&engine.initialize(params)?);
//! engine.run(500, &mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{AgentSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;
