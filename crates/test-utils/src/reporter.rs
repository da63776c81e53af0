use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use surfigures::exec::{RunReporter, RunSummary};

/// One call received by a [`CapturingReporter`]. Messages hold the
/// displayed [`RunSummary`].
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    Started { command_line: String, log_file: PathBuf },
    Succeeded { message: String },
    Failed { message: String, log_file: PathBuf },
}

impl ReportEvent {
    pub fn is_error(&self) -> bool {
        matches!(self, ReportEvent::Failed { .. })
    }
}

/// A reporter that records every event instead of logging it.
///
/// Cheap to clone; clones share the same event list.
#[derive(Debug, Clone, Default)]
pub struct CapturingReporter {
    events: Arc<Mutex<Vec<ReportEvent>>>,
}

impl CapturingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ReportEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<ReportEvent> {
        self.events().into_iter().filter(ReportEvent::is_error).collect()
    }

    fn push(&self, event: ReportEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl RunReporter for CapturingReporter {
    fn started(&self, command_line: &str, log_file: &Path) {
        self.push(ReportEvent::Started {
            command_line: command_line.to_string(),
            log_file: log_file.to_path_buf(),
        });
    }

    fn succeeded(&self, summary: &RunSummary) {
        self.push(ReportEvent::Succeeded {
            message: summary.to_string(),
        });
    }

    fn failed(&self, summary: &RunSummary, log_file: &Path) {
        self.push(ReportEvent::Failed {
            message: summary.to_string(),
            log_file: log_file.to_path_buf(),
        });
    }
}
