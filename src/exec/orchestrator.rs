// src/exec/orchestrator.rs

//! Run the verification tool once for an input set.

use std::ffi::OsString;
use std::fs::File;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::errors::{Result, SurfiguresError};
use crate::exec::log_path::log_path_for;
use crate::exec::report::{RunReporter, RunSummary, TracingReporter};
use crate::inputs::InputSet;
use crate::options::Options;

/// How a run that actually executed the tool ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The tool exited with status zero.
    Passed { elapsed: Duration },
    /// The tool exited non-zero. `exit_code` is `None` when it was killed by a
    /// signal.
    Failed {
        exit_code: Option<i32>,
        elapsed: Duration,
    },
}

impl RunOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, RunOutcome::Passed { .. })
    }

    /// Seconds spent running the tool, or `None` if verification failed.
    pub fn elapsed_secs(&self) -> Option<f64> {
        match self {
            RunOutcome::Passed { elapsed } => Some(elapsed.as_secs_f64()),
            RunOutcome::Failed { .. } => None,
        }
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            RunOutcome::Passed { .. } => Some(0),
            RunOutcome::Failed { exit_code, .. } => *exit_code,
        }
    }
}

/// Run the tool for `input_set`, writing its output to `output_file` and its
/// combined stdout/stderr to [`log_path_for`]`(output_file)`.
///
/// Reports through [`TracingReporter`]. See [`run_with_reporter`].
pub fn run(input_set: &InputSet, output_file: &Path, options: &Options) -> Result<RunOutcome> {
    run_with_reporter(input_set, output_file, options, &TracingReporter)
}

/// Run the tool once and report the outcome to `reporter`.
///
/// A non-zero exit is `Ok(RunOutcome::Failed)`, never an error. `Err` means
/// the tool could not be run at all: the scratch directory, the expansion,
/// the log file or the process launch failed. The scratch directory is
/// removed on every path out of this function. Whether the tool actually
/// wrote `output_file` is not checked.
pub fn run_with_reporter(
    input_set: &InputSet,
    output_file: &Path,
    options: &Options,
    reporter: &dyn RunReporter,
) -> Result<RunOutcome> {
    let scratch = create_scratch_dir(options)?;
    debug!(scratch = %scratch.path().display(), "created scratch directory");

    let expanded = input_set.expand(options, scratch.path())?;
    let cmd = expanded.to_cmd(output_file);
    drop(expanded);

    let log_file = log_path_for(output_file);
    reporter.started(&shell_join(&cmd), &log_file);

    let start = Instant::now();
    let status = execute(&cmd, &log_file)?;
    let elapsed = start.elapsed();

    let scratch_path = scratch.path().to_path_buf();
    if let Err(err) = scratch.close() {
        warn!(scratch = %scratch_path.display(), error = %err, "failed to remove scratch directory");
    }

    let summary = RunSummary::new(input_set, output_file, elapsed);
    if status.success() {
        reporter.succeeded(&summary);
        Ok(RunOutcome::Passed { elapsed })
    } else {
        debug!(?status, "tool exited unsuccessfully");
        reporter.failed(&summary, &log_file);
        Ok(RunOutcome::Failed {
            exit_code: status.code(),
            elapsed,
        })
    }
}

/// Fresh scratch directory under `options.scratch_root`, or the system temp
/// dir when unset. Removed when the returned guard drops.
pub fn create_scratch_dir(options: &Options) -> Result<TempDir> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("surfigures-");
    let dir = match &options.scratch_root {
        Some(root) => builder.tempdir_in(root),
        None => builder.tempdir(),
    };
    dir.map_err(SurfiguresError::Scratch)
}

/// Spawn `cmd` with stdout and stderr both appended to a freshly truncated
/// `log_file`, and block until it exits.
fn execute(cmd: &[OsString], log_file: &Path) -> Result<ExitStatus> {
    let (program, args) = cmd
        .split_first()
        .ok_or_else(|| SurfiguresError::InputError("empty command line".to_string()))?;

    let log_err = |source| SurfiguresError::LogFile {
        path: log_file.to_path_buf(),
        source,
    };
    let stdout = File::create(log_file).map_err(log_err)?;
    let stderr = stdout.try_clone().map_err(log_err)?;

    Command::new(program)
        .args(args)
        .stdout(Stdio::from(stdout))
        .stderr(Stdio::from(stderr))
        .status()
        .map_err(|source| SurfiguresError::Launch {
            program: program.to_string_lossy().into_owned(),
            source,
        })
}

/// Quote a command line the way a POSIX shell would need it.
pub fn shell_join(cmd: &[OsString]) -> String {
    cmd.iter()
        .map(|arg| shell_escape::escape(arg.to_string_lossy()).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
