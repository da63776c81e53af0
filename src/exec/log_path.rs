// src/exec/log_path.rs

use std::path::{Path, PathBuf};

/// Path of the log file that accompanies `output_file`: the same path with
/// its extension replaced by `log`.
///
/// `out/bunny.obj` → `out/bunny.log`, `out/bunny` → `out/bunny.log`,
/// `a.b.obj` → `a.b.log`.
pub fn log_path_for(output_file: &Path) -> PathBuf {
    output_file.with_extension("log")
}
