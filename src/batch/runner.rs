// src/batch/runner.rs

use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::batch::plan::PlannedRun;
use crate::batch::report::{BatchReport, RunRecord, RunStatus};
use crate::errors::Result;
use crate::exec::{RunOutcome, RunReporter, run_with_reporter};

/// Run every planned run through the orchestrator, at most `jobs` at a time.
///
/// Each run executes on tokio's blocking pool. A run that cannot start (an
/// infrastructure error) or that panics is recorded as `Errored` and does
/// not stop the others. The returned report lists runs in plan order.
pub async fn run_batch(
    plan: Vec<PlannedRun>,
    jobs: usize,
    reporter: Arc<dyn RunReporter>,
) -> Result<BatchReport> {
    let total = plan.len();
    let permits = Arc::new(Semaphore::new(jobs.max(1)));
    let mut set = JoinSet::new();
    let mut identities = Vec::with_capacity(total);

    info!(runs = total, jobs = jobs.max(1), "starting batch");

    for (index, planned) in plan.into_iter().enumerate() {
        let permit = Arc::clone(&permits)
            .acquire_owned()
            .await
            .context("acquiring run permit")?;
        let reporter = Arc::clone(&reporter);
        identities.push((planned.name.clone(), planned.output.clone()));

        set.spawn_blocking(move || {
            let _permit = permit;
            let caught = panic::catch_unwind(AssertUnwindSafe(|| {
                execute_planned(&planned, reporter.as_ref())
            }));
            let status = match caught {
                Ok(result) => {
                    if let Err(err) = &result {
                        error!(run = %planned.name, error = %err, "run could not be executed");
                    }
                    RunStatus::from_result(&result)
                }
                Err(payload) => {
                    let message = format!("run panicked: {}", panic_message(payload.as_ref()));
                    error!(run = %planned.name, %message, "run aborted");
                    RunStatus::Errored { message }
                }
            };
            let record = RunRecord {
                status,
                name: planned.name,
                output: planned.output,
            };
            (index, record)
        });
    }

    let mut slots: Vec<Option<RunRecord>> = vec![None; total];
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, record)) => slots[index] = Some(record),
            Err(err) => error!(error = %err, "run task did not complete"),
        }
    }

    let records = slots
        .into_iter()
        .zip(identities)
        .map(|(slot, (name, output))| {
            slot.unwrap_or_else(|| RunRecord {
                name,
                output,
                status: RunStatus::Errored {
                    message: "run task did not complete".to_string(),
                },
            })
        })
        .collect();
    let report = BatchReport { records };

    info!(
        passed = report.passed(),
        failed = report.failed(),
        errored = report.errored(),
        "batch finished"
    );

    Ok(report)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown cause")
}

fn execute_planned(planned: &PlannedRun, reporter: &dyn RunReporter) -> Result<RunOutcome> {
    ensure_parent_dir(&planned.output)?;
    run_with_reporter(&planned.input_set, &planned.output, &planned.options, reporter)
}

/// The tool writes the output and we write the log next to it, so the
/// directory has to exist first.
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
