// src/inputs/patterns.rs

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::trace;

use crate::errors::Result;
use crate::options::Options;

/// Compiled include/exclude globs used to pick files out of directory sources.
///
/// Patterns are matched against the path relative to the directory source,
/// with forward slashes (e.g. `"meshes/bunny.obj"`).
#[derive(Clone)]
pub struct FileFilter {
    include_set: GlobSet,
    exclude_set: Option<GlobSet>,
}

impl fmt::Debug for FileFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileFilter")
            .field("include", &self.include_set.len())
            .field("exclude", &self.exclude_set.as_ref().map(GlobSet::len))
            .finish()
    }
}

impl FileFilter {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self> {
        let include_set = build_globset(include)?;
        let exclude_set = if exclude.is_empty() {
            None
        } else {
            Some(build_globset(exclude)?)
        };
        Ok(Self {
            include_set,
            exclude_set,
        })
    }

    pub fn from_options(options: &Options) -> Result<Self> {
        Self::new(&options.include, &options.exclude)
    }

    /// Returns true if a file at `rel_path` (relative to its directory source)
    /// should be part of the expansion.
    pub fn matches(&self, rel_path: &str) -> bool {
        if !self.include_set.is_match(rel_path) {
            return false;
        }
        if let Some(exclude) = &self.exclude_set {
            if exclude.is_match(rel_path) {
                return false;
            }
        }
        true
    }
}

/// Build a GlobSet from simple string patterns.
pub fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        builder.add(Glob::new(pat)?);
    }
    Ok(builder.build()?)
}

/// Collect all files under `root` accepted by `filter`.
///
/// Symlinked directories are not followed. Order of the result is unspecified;
/// callers sort.
pub fn collect_matching_files(root: &Path, filter: &FileFilter) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            let file_type = entry.file_type()?;

            if file_type.is_dir() {
                stack.push(path);
            } else if path.is_file() {
                if let Ok(rel) = path.strip_prefix(root) {
                    let rel_str = rel.to_string_lossy().replace('\\', "/");
                    if filter.matches(&rel_str) {
                        files.push(path);
                    } else {
                        trace!(path = %rel_str, "skipping file not matched by include/exclude");
                    }
                }
            }
        }
    }

    Ok(files)
}
