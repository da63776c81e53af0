// src/inputs/staging.rs

//! Placing resolved input files into the scratch directory.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::errors::{Result, SurfiguresError};
use crate::types::StageMode;

/// Stage `files` into `scratch_dir` and return the paths the tool should see,
/// in the same order as `files`.
///
/// Staged files keep their file name. When two inputs share a name, the later
/// one is prefixed with its position (`001-a.obj`).
pub fn stage_files(files: &[PathBuf], scratch_dir: &Path, mode: StageMode) -> Result<Vec<PathBuf>> {
    if mode == StageMode::Direct {
        return Ok(files.to_vec());
    }

    let mut used: HashSet<OsString> = HashSet::new();
    let mut staged = Vec::with_capacity(files.len());

    for (index, src) in files.iter().enumerate() {
        let name = src.file_name().ok_or_else(|| {
            SurfiguresError::InputError(format!("input '{}' has no file name", src.display()))
        })?;

        let mut candidate = name.to_os_string();
        let mut position = index;
        while used.contains(&candidate) {
            let mut prefixed = OsString::from(format!("{position:03}-"));
            prefixed.push(name);
            candidate = prefixed;
            position += files.len();
        }
        used.insert(candidate.clone());

        let dest = scratch_dir.join(&candidate);
        place(src, &dest, mode)?;
        trace!(src = %src.display(), dest = %dest.display(), %mode, "staged input");
        staged.push(dest);
    }

    Ok(staged)
}

fn place(src: &Path, dest: &Path, mode: StageMode) -> Result<()> {
    match mode {
        StageMode::Direct => Ok(()),
        StageMode::Copy => {
            fs::copy(src, dest)?;
            Ok(())
        }
        StageMode::Link => link(src, dest),
    }
}

#[cfg(unix)]
fn link(src: &Path, dest: &Path) -> Result<()> {
    // Relative targets would resolve against the scratch directory.
    let target = fs::canonicalize(src)?;
    std::os::unix::fs::symlink(target, dest)?;
    Ok(())
}

#[cfg(not(unix))]
fn link(src: &Path, dest: &Path) -> Result<()> {
    fs::copy(src, dest)?;
    Ok(())
}
