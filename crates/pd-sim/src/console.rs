//! Human-readable status log handed to the caller.
//!
//! The console is an append-only list of `{ text, severity }` lines that a
//! control panel displays as-is.  It reports outcomes (initialized, warning,
//! failed, complete); it is not part of simulation correctness.  Every line
//! is also emitted as a `tracing` event at the matching level.

use std::fmt;

use tracing::{error, info, warn};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info    => "info",
            Severity::Warning => "warning",
            Severity::Error   => "error",
        };
        f.write_str(s)
    }
}

/// One console entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleLine {
    pub text:     String,
    pub severity: Severity,
}

impl ConsoleLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self { text: text.into(), severity: Severity::Info }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { text: text.into(), severity: Severity::Warning }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), severity: Severity::Error }
    }
}

impl fmt::Display for ConsoleLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "> {}", self.text)
    }
}

/// Ordered, append-only console.  Only [`reset`](Self::reset) clears it,
/// which the engine does at the start of every initialization.
#[derive(Clone, Debug, Default)]
pub struct ConsoleLog {
    lines: Vec<ConsoleLine>,
}

impl ConsoleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: ConsoleLine) {
        match line.severity {
            Severity::Info    => info!(target: "pd_sim::console", "{}", line.text),
            Severity::Warning => warn!(target: "pd_sim::console", "{}", line.text),
            Severity::Error   => error!(target: "pd_sim::console", "{}", line.text),
        }
        self.lines.push(line);
    }

    /// Drop every line and start over with `first`.
    pub fn reset(&mut self, first: ConsoleLine) {
        self.lines.clear();
        self.push(first);
    }

    pub fn lines(&self) -> &[ConsoleLine] {
        &self.lines
    }

    pub fn last(&self) -> Option<&ConsoleLine> {
        self.lines.last()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines at `severity` or above.
    pub fn at_least(&self, severity: Severity) -> impl Iterator<Item = &ConsoleLine> + '_ {
        self.lines.iter().filter(move |l| l.severity >= severity)
    }
}
