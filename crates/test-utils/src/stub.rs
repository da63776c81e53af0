//! Stand-ins for the verification tool.
//!
//! The stub is `sh -c <script> stub`, so the arguments the orchestrator
//! appends (`-o <output> files...`) arrive as `$1`, `$2`, ... in the script.

use std::fs;
use std::path::{Path, PathBuf};

use surfigures::Options;
use surfigures::types::StageMode;

/// Options that run `script` instead of the real tool, with direct staging
/// so file arguments are the fixture paths themselves.
pub fn stub_tool(script: &str) -> Options {
    Options::new()
        .with_tool("sh")
        .with_tool_args(["-c", script, "stub"])
        .with_stage(StageMode::Direct)
}

/// Script that prints every argument on its own line, then exits with `code`.
pub fn echo_args_script(code: i32) -> String {
    format!("for a in \"$@\"; do echo \"$a\"; done; exit {code}")
}

/// Write small fake surface files into `dir` and return their paths.
pub fn write_inputs(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, format!("# surface {name}\nv 0 0 0\n")).unwrap();
            path
        })
        .collect()
}

/// Number of entries directly inside `dir`.
pub fn entry_count(dir: &Path) -> usize {
    fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}
