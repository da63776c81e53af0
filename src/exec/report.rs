// src/exec/report.rs

//! Reporting of run progress.
//!
//! The orchestrator never logs directly; it talks to a [`RunReporter`]. The
//! production implementation, [`TracingReporter`], turns each call into a
//! `tracing` event. Tests plug in a reporter that records the calls instead.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{error, info};

use crate::inputs::InputSet;

/// One-line description of a finished run:
/// `(a.obj, b.obj) --> out/ab.obj took 1.3s`.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    sources: String,
    output_file: PathBuf,
    elapsed: Duration,
}

impl RunSummary {
    pub fn new(input_set: &InputSet, output_file: &Path, elapsed: Duration) -> Self {
        Self {
            sources: input_set.to_string(),
            output_file: output_file.to_path_buf(),
            elapsed,
        }
    }

    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} --> {} took {:.1}s",
            self.sources,
            self.output_file.display(),
            self.elapsed.as_secs_f64()
        )
    }
}

/// Receives the events of a single orchestrator run.
///
/// Implementations must be shareable across threads; the batch layer hands
/// one reporter to every concurrent run.
pub trait RunReporter: Send + Sync {
    /// The command is about to start, with its output going to `log_file`.
    fn started(&self, command_line: &str, log_file: &Path);

    /// The tool exited with status zero.
    fn succeeded(&self, summary: &RunSummary);

    /// The tool exited with a non-zero status (or was killed).
    fn failed(&self, summary: &RunSummary, log_file: &Path);
}

/// Reporter that emits `tracing` events: `info` for start and success,
/// `error` for failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl RunReporter for TracingReporter {
    fn started(&self, command_line: &str, log_file: &Path) {
        info!("running: {} > {}", command_line, log_file.display());
    }

    fn succeeded(&self, summary: &RunSummary) {
        info!(
            output = %summary.output_file().display(),
            elapsed_secs = summary.elapsed().as_secs_f64(),
            "{summary}"
        );
    }

    fn failed(&self, summary: &RunSummary, log_file: &Path) {
        error!(
            output = %summary.output_file().display(),
            log_file = %log_file.display(),
            "{summary}, please check {}",
            log_file.display()
        );
    }
}
