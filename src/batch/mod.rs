// src/batch/mod.rs

//! Driving many orchestrator runs from a config file.
//!
//! - [`plan`] turns configured runs into orchestrator calls.
//! - [`runner`] executes them with bounded concurrency.
//! - [`report`] collects outcomes and renders the timings file.

pub mod plan;
pub mod report;
pub mod runner;

pub use plan::{PlannedRun, plan_runs};
pub use report::{BatchReport, RunRecord, RunStatus};
pub use runner::run_batch;
