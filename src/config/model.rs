// src/config/model.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::{Result, SurfiguresError};
use crate::options::Options;
use crate::types::StageMode;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [options]
/// tool = "verify_surface_all"
/// include = ["**/*.obj"]
///
/// [run.bunny]
/// src = ["meshes/bunny_a.obj", "meshes/bunny_b/"]
/// output = "out/bunny.obj"
/// ```
///
/// This is the unvalidated form; convert it into a [`ConfigFile`] to use it.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    /// Defaults for every run, from `[options]`.
    #[serde(default)]
    pub options: Options,

    /// All runs from `[run.<name>]`, keyed by run name.
    #[serde(default)]
    pub run: BTreeMap<String, RunConfig>,
}

/// `[run.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Files and directories verified together.
    pub src: Vec<PathBuf>,

    /// Output file the tool writes. The log goes next to it with a `.log`
    /// extension.
    pub output: PathBuf,

    /// Run-local tool arguments.
    ///
    /// If `None`, the run uses `options.tool_args`.
    #[serde(default)]
    pub tool_args: Option<Vec<String>>,

    /// If true, `tool_args` is appended to `options.tool_args`.
    ///
    /// Otherwise, `tool_args` replaces `options.tool_args`.
    #[serde(default)]
    pub append_default_args: bool,

    /// Run-local include globs; replace `options.include` when set.
    #[serde(default)]
    pub include: Option<Vec<String>>,

    /// Run-local exclude globs; replace `options.exclude` when set.
    #[serde(default)]
    pub exclude: Option<Vec<String>>,

    #[serde(default)]
    pub stage: Option<StageMode>,
}

impl RunConfig {
    pub fn new<I, P>(src: I, output: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            src: src.into_iter().map(Into::into).collect(),
            output: output.into(),
            tool_args: None,
            append_default_args: false,
            include: None,
            exclude: None,
            stage: None,
        }
    }

    /// Options for this run: `defaults` with the run-local overrides applied.
    pub fn effective_options(&self, defaults: &Options) -> Options {
        let mut options = defaults.clone();
        options.tool_args = effective_list(
            self.tool_args.as_ref(),
            &defaults.tool_args,
            self.append_default_args,
        );
        if let Some(include) = &self.include {
            options.include = include.clone();
        }
        if let Some(exclude) = &self.exclude {
            options.exclude = exclude.clone();
        }
        if let Some(stage) = self.stage {
            options.stage = stage;
        }
        options
    }
}

/// Decide the effective list when a run may override or extend a default.
fn effective_list(
    run_list: Option<&Vec<String>>,
    default_list: &[String],
    append_to_default: bool,
) -> Vec<String> {
    match (run_list, append_to_default) {
        (Some(list), true) => {
            let mut combined = default_list.to_vec();
            combined.extend(list.iter().cloned());
            combined
        }
        (Some(list), false) => list.clone(),
        (None, _) => default_list.to_vec(),
    }
}

/// Validated configuration.
///
/// Relative paths (`src`, `output`, `scratch_root`) have been resolved
/// against `base_dir`, the directory of the config file.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    options: Options,
    runs: BTreeMap<String, RunConfig>,
    base_dir: PathBuf,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        options: Options,
        runs: BTreeMap<String, RunConfig>,
        base_dir: PathBuf,
    ) -> Self {
        Self {
            options,
            runs,
            base_dir,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn runs(&self) -> &BTreeMap<String, RunConfig> {
        &self.runs
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn run(&self, name: &str) -> Result<&RunConfig> {
        self.runs
            .get(name)
            .ok_or_else(|| SurfiguresError::RunNotFound(name.to_string()))
    }
}
