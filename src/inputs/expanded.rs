// src/inputs/expanded.rs

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::options::Options;

/// Inputs resolved into concrete files, ready to be turned into a command.
///
/// Borrows the scratch directory the files were staged into, so it cannot
/// outlive the guard that owns that directory.
#[derive(Debug, Clone)]
pub struct ExpandedInputs<'s> {
    scratch_dir: &'s Path,
    tool: PathBuf,
    tool_args: Vec<String>,
    output_flag: String,
    files: Vec<PathBuf>,
}

impl<'s> ExpandedInputs<'s> {
    pub(crate) fn new(options: &Options, scratch_dir: &'s Path, files: Vec<PathBuf>) -> Self {
        Self {
            scratch_dir,
            tool: options.tool.clone(),
            tool_args: options.tool_args.clone(),
            output_flag: options.output_flag.clone(),
            files,
        }
    }

    pub fn scratch_dir(&self) -> &'s Path {
        self.scratch_dir
    }

    /// Files handed to the tool, in command-line order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Build the full command line targeting `output_file`:
    ///
    /// `tool [tool_args...] <output_flag> <output_file> files...`
    ///
    /// The first element is the program.
    pub fn to_cmd(&self, output_file: &Path) -> Vec<OsString> {
        let mut cmd = Vec::with_capacity(3 + self.tool_args.len() + self.files.len());
        cmd.push(self.tool.clone().into_os_string());
        cmd.extend(self.tool_args.iter().map(OsString::from));
        cmd.push(OsString::from(&self.output_flag));
        cmd.push(output_file.as_os_str().to_os_string());
        cmd.extend(self.files.iter().map(|f| f.as_os_str().to_os_string()));
        cmd
    }
}
