// src/lib.rs

pub mod batch;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod inputs;
pub mod logging;
pub mod options;
pub mod types;

use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use tracing::{debug, info};

use crate::batch::{PlannedRun, plan_runs, run_batch};
use crate::cli::CliArgs;
use crate::config::load_and_validate;
use crate::exec::{TracingReporter, create_scratch_dir, log_path_for, shell_join};

pub use crate::exec::{RunOutcome, run};
pub use crate::inputs::{ExpandedInputs, InputSet};
pub use crate::options::Options;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - run selection
/// - the batch runner (or the dry-run listing)
/// - the optional timings file
///
/// Returns an error when any run failed or could not be executed.
pub async fn run_cli(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(&args.config)?;
    let plan = plan_runs(&cfg, &args.runs)?;

    if args.dry_run {
        print_dry_run(&plan)?;
        return Ok(());
    }

    let report = run_batch(plan, args.jobs, Arc::new(TracingReporter)).await?;

    if let Some(path) = &args.timings {
        report.write_timings(path)?;
        info!(path = %path.display(), "wrote timings");
    }

    if report.all_passed() {
        Ok(())
    } else {
        Err(anyhow!(
            "{} of {} runs did not pass ({} failed, {} errored)",
            report.failed() + report.errored(),
            report.records.len(),
            report.failed(),
            report.errored()
        ))
    }
}

/// Dry-run output: expand every run into a throwaway scratch directory and
/// print the command that would be executed.
fn print_dry_run(plan: &[PlannedRun]) -> Result<()> {
    print!("{}", render_dry_run(plan)?);
    debug!("dry-run complete (no execution)");
    Ok(())
}

/// The dry-run listing as text.
///
/// Inputs are staged the same way a real run stages them, under the run's
/// `scratch_root`, and the scratch directory is removed again afterwards.
pub fn render_dry_run(plan: &[PlannedRun]) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "surfigures dry-run")?;
    writeln!(out)?;
    writeln!(out, "runs ({}):", plan.len())?;

    for planned in plan {
        let scratch = create_scratch_dir(&planned.options)?;
        let expanded = planned.input_set.expand(&planned.options, scratch.path())?;
        let cmd = expanded.to_cmd(&planned.output);

        writeln!(out, "  - {}", planned.name)?;
        writeln!(out, "      src: {}", planned.input_set)?;
        writeln!(out, "      files: {}", expanded.files().len())?;
        writeln!(out, "      stage: {}", planned.options.stage)?;
        writeln!(out, "      cmd: {}", shell_join(&cmd))?;
        writeln!(out, "      log: {}", log_path_for(&planned.output).display())?;
    }

    Ok(out)
}
