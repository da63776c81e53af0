// src/batch/plan.rs

use std::path::PathBuf;

use crate::config::ConfigFile;
use crate::errors::Result;
use crate::inputs::InputSet;
use crate::options::Options;

/// Everything needed to call the orchestrator for one configured run.
#[derive(Debug, Clone)]
pub struct PlannedRun {
    pub name: String,
    pub input_set: InputSet,
    pub output: PathBuf,
    pub options: Options,
}

/// Turn the runs of `cfg` into orchestrator calls.
///
/// With an empty `selected`, every run is planned in name order. Otherwise
/// only the named runs are planned, in the order given; unknown names are an
/// error and repeated names are planned once.
pub fn plan_runs(cfg: &ConfigFile, selected: &[String]) -> Result<Vec<PlannedRun>> {
    let names: Vec<&str> = if selected.is_empty() {
        cfg.runs().keys().map(String::as_str).collect()
    } else {
        let mut names: Vec<&str> = Vec::with_capacity(selected.len());
        for name in selected {
            if !names.contains(&name.as_str()) {
                names.push(name.as_str());
            }
        }
        names
    };

    names
        .into_iter()
        .map(|name| {
            let run = cfg.run(name)?;
            Ok(PlannedRun {
                name: name.to_string(),
                input_set: InputSet::new(run.src.iter().cloned()),
                output: run.output.clone(),
                options: run.effective_options(cfg.options()),
            })
        })
        .collect()
}
