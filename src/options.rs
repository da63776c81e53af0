// src/options.rs

//! The `Options` value that controls input expansion and the tool command line.

use std::path::PathBuf;

use serde::Deserialize;

use crate::types::StageMode;

/// Name of the verification tool invoked when nothing else is configured.
pub const DEFAULT_TOOL: &str = "verify_surface_all";

/// Options shared by every run of a config, as read from `[options]`:
///
/// ```toml
/// [options]
/// tool = "verify_surface_all"
/// tool_args = ["--tolerance", "1e-6"]
/// output_flag = "-o"
/// include = ["**/*.obj"]
/// exclude = ["**/scratch/**"]
/// stage = "link"
/// scratch_root = "/fast/tmp"
/// ```
///
/// All keys are optional. The value is treated as immutable for the duration
/// of a run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Options {
    /// Executable to run. Looked up on `PATH` when it has no directory part.
    #[serde(default = "default_tool")]
    pub tool: PathBuf,

    /// Extra arguments placed between the tool and the output flag.
    #[serde(default)]
    pub tool_args: Vec<String>,

    /// Flag that introduces the output file.
    #[serde(default = "default_output_flag")]
    pub output_flag: String,

    /// Globs selecting files inside directory sources, matched against the
    /// path relative to that directory.
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    /// Globs removing files from directory sources.
    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub stage: StageMode,

    /// Where the per-run scratch directory is created. `None` means the system
    /// temp dir.
    #[serde(default)]
    pub scratch_root: Option<PathBuf>,
}

fn default_tool() -> PathBuf {
    PathBuf::from(DEFAULT_TOOL)
}

fn default_output_flag() -> String {
    "-o".to_string()
}

fn default_include() -> Vec<String> {
    vec!["**/*.obj".to_string()]
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            tool_args: Vec::new(),
            output_flag: default_output_flag(),
            include: default_include(),
            exclude: Vec::new(),
            stage: StageMode::default(),
            scratch_root: None,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tool(mut self, tool: impl Into<PathBuf>) -> Self {
        self.tool = tool.into();
        self
    }

    pub fn with_tool_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tool_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_output_flag(mut self, flag: impl Into<String>) -> Self {
        self.output_flag = flag.into();
        self
    }

    pub fn with_include<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_stage(mut self, stage: StageMode) -> Self {
        self.stage = stage;
        self
    }

    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }
}
