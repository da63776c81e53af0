// src/inputs/input_set.rs

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{Result, SurfiguresError};
use crate::inputs::expanded::ExpandedInputs;
use crate::inputs::patterns::{FileFilter, collect_matching_files};
use crate::inputs::staging::stage_files;
use crate::options::Options;

/// A declarative set of surface files that are verified together.
///
/// Each entry in `src` is either a file or a directory. Directories are
/// searched recursively using the `include`/`exclude` globs of the
/// [`Options`] passed to [`InputSet::expand`]. Relative entries resolve
/// against `base_dir` when one is set, otherwise against the current
/// working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSet {
    src: Vec<PathBuf>,
    base_dir: Option<PathBuf>,
}

impl InputSet {
    pub fn new<I, P>(src: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            src: src.into_iter().map(Into::into).collect(),
            base_dir: None,
        }
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    fn resolve(&self, src: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if src.is_relative() => base.join(src),
            _ => src.to_path_buf(),
        }
    }

    /// Resolve every source into concrete files and stage them into
    /// `scratch_dir` according to `options.stage`.
    ///
    /// Explicit file sources are always taken; include/exclude only filter
    /// the contents of directory sources. The result is sorted by source path
    /// and free of duplicates. An input set that resolves to no file at all is
    /// an error.
    pub fn expand<'s>(
        &self,
        options: &Options,
        scratch_dir: &'s Path,
    ) -> Result<ExpandedInputs<'s>> {
        let filter = FileFilter::from_options(options)?;
        let mut files = Vec::new();

        for src in &self.src {
            let path = self.resolve(src);
            if path.is_file() {
                files.push(path);
            } else if path.is_dir() {
                let found = collect_matching_files(&path, &filter)?;
                debug!(dir = %path.display(), count = found.len(), "expanded directory source");
                files.extend(found);
            } else {
                return Err(SurfiguresError::InputError(format!(
                    "input '{}' does not exist",
                    path.display()
                )));
            }
        }

        files.sort();
        files.dedup();

        if files.is_empty() {
            return Err(SurfiguresError::InputError(format!(
                "inputs {} matched no files",
                self
            )));
        }

        let staged = stage_files(&files, scratch_dir, options.stage)?;
        Ok(ExpandedInputs::new(options, scratch_dir, staged))
    }
}

/// Renders the sources as a parenthesised list, e.g. `(a.obj, meshes/)`.
impl fmt::Display for InputSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, src) in self.src.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", src.display())?;
        }
        f.write_str(")")
    }
}
