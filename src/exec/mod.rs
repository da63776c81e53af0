// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`orchestrator`] runs the verification tool once for an input set,
//!   capturing its output in a log file and timing it.
//! - [`report`] defines the [`RunReporter`] the orchestrator reports to.
//! - [`log_path`] derives the log file location from the output file.

pub mod log_path;
pub mod orchestrator;
pub mod report;

pub use log_path::log_path_for;
pub use orchestrator::{RunOutcome, create_scratch_dir, run, run_with_reporter, shell_join};
pub use report::{RunReporter, RunSummary, TracingReporter};
