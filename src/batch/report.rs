// src/batch/report.rs

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::errors::{Result, SurfiguresError};
use crate::exec::RunOutcome;

/// Final state of one run in a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum RunStatus {
    Passed { elapsed_secs: f64 },
    /// The tool ran and exited non-zero.
    Failed { exit_code: Option<i32> },
    /// The tool could not be run at all.
    Errored { message: String },
}

impl RunStatus {
    pub fn from_result(result: &Result<RunOutcome>) -> Self {
        match result {
            Ok(RunOutcome::Passed { elapsed }) => RunStatus::Passed {
                elapsed_secs: elapsed.as_secs_f64(),
            },
            Ok(RunOutcome::Failed { exit_code, .. }) => RunStatus::Failed {
                exit_code: *exit_code,
            },
            Err(err) => RunStatus::Errored {
                message: err.to_string(),
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RunStatus::Passed { .. } => "passed",
            RunStatus::Failed { .. } => "failed",
            RunStatus::Errored { .. } => "errored",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    pub name: String,
    pub output: PathBuf,
    pub status: RunStatus,
}

/// Outcome of a whole batch, one record per planned run in plan order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub records: Vec<RunRecord>,
}

impl BatchReport {
    pub fn passed(&self) -> usize {
        self.count(|s| matches!(s, RunStatus::Passed { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, RunStatus::Failed { .. }))
    }

    pub fn errored(&self) -> usize {
        self.count(|s| matches!(s, RunStatus::Errored { .. }))
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.records.len()
    }

    fn count(&self, pred: impl Fn(&RunStatus) -> bool) -> usize {
        self.records.iter().filter(|r| pred(&r.status)).count()
    }

    /// Render the report as TOML, one `[[run]]` table per record.
    pub fn to_timings_toml(&self) -> Result<String> {
        let file = TimingsFile {
            run: self.records.iter().map(TimingEntry::from).collect(),
        };
        toml::to_string(&file).map_err(SurfiguresError::from)
    }

    /// Write [`BatchReport::to_timings_toml`] to `path`, creating parent
    /// directories as needed.
    pub fn write_timings(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_timings_toml()?)?;
        Ok(())
    }
}

#[derive(Serialize)]
struct TimingsFile<'a> {
    run: Vec<TimingEntry<'a>>,
}

#[derive(Serialize)]
struct TimingEntry<'a> {
    name: &'a str,
    output: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_secs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl<'a> From<&'a RunRecord> for TimingEntry<'a> {
    fn from(record: &'a RunRecord) -> Self {
        let (elapsed_secs, exit_code, error) = match &record.status {
            RunStatus::Passed { elapsed_secs } => (Some(*elapsed_secs), None, None),
            RunStatus::Failed { exit_code } => (None, *exit_code, None),
            RunStatus::Errored { message } => (None, None, Some(message.as_str())),
        };
        Self {
            name: &record.name,
            output: record.output.display().to_string(),
            status: record.status.label(),
            elapsed_secs,
            exit_code,
            error,
        }
    }
}
