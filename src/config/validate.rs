// src/config/validate.rs

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use crate::config::model::{ConfigFile, RawConfigFile, RunConfig};
use crate::errors::{Result, SurfiguresError};
use crate::exec::log_path_for;
use crate::inputs::patterns::build_globset;
use crate::options::Options;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = SurfiguresError;

    /// Validate with paths relative to the current working directory.
    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        ConfigFile::from_raw(raw, PathBuf::new())
    }
}

impl ConfigFile {
    /// Validate `raw` and resolve its relative paths against `base_dir`.
    ///
    /// Outputs are compared after resolution, so `out/x.obj`, `./out/x.obj`
    /// and `<base_dir>/out/x.obj` count as the same file.
    pub fn from_raw(raw: RawConfigFile, base_dir: impl Into<PathBuf>) -> Result<Self> {
        validate_raw_config(&raw)?;

        let base_dir = base_dir.into();
        let options = resolve_options(raw.options, &base_dir);
        let runs: BTreeMap<String, RunConfig> = raw
            .run
            .into_iter()
            .map(|(name, run)| (name, resolve_run(run, &base_dir)))
            .collect();

        validate_distinct_outputs(&runs)?;

        Ok(ConfigFile::new_unchecked(options, runs, base_dir))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_runs(cfg)?;
    validate_options(&cfg.options)?;
    for (name, run) in cfg.run.iter() {
        validate_run(name, run)?;
    }
    Ok(())
}

fn ensure_has_runs(cfg: &RawConfigFile) -> Result<()> {
    if cfg.run.is_empty() {
        return Err(SurfiguresError::ConfigError(
            "config must contain at least one [run.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_options(options: &Options) -> Result<()> {
    if options.tool.as_os_str().is_empty() {
        return Err(SurfiguresError::ConfigError(
            "[options].tool must not be empty".to_string(),
        ));
    }
    if options.output_flag.is_empty() {
        return Err(SurfiguresError::ConfigError(
            "[options].output_flag must not be empty".to_string(),
        ));
    }
    check_patterns("[options].include", &options.include)?;
    check_patterns("[options].exclude", &options.exclude)?;
    Ok(())
}

fn validate_run(name: &str, run: &RunConfig) -> Result<()> {
    if run.src.is_empty() {
        return Err(SurfiguresError::ConfigError(format!(
            "run '{name}' has an empty `src` list"
        )));
    }

    if run.output.file_name().is_none() {
        return Err(SurfiguresError::ConfigError(format!(
            "run '{name}' has an output without a file name: {:?}",
            run.output
        )));
    }

    if run.output.extension().is_some_and(|ext| ext == "log") {
        return Err(SurfiguresError::ConfigError(format!(
            "run '{name}' output {:?} would be overwritten by its own log file",
            run.output
        )));
    }

    if let Some(include) = &run.include {
        check_patterns(&format!("run '{name}' include"), include)?;
    }
    if let Some(exclude) = &run.exclude {
        check_patterns(&format!("run '{name}' exclude"), exclude)?;
    }
    Ok(())
}

/// Two runs writing the same output or the same log file would clobber each
/// other, especially when run concurrently. Expects resolved outputs.
fn validate_distinct_outputs(runs: &BTreeMap<String, RunConfig>) -> Result<()> {
    let mut outputs: BTreeMap<&Path, &str> = BTreeMap::new();
    let mut logs: BTreeMap<PathBuf, &str> = BTreeMap::new();

    for (name, run) in runs.iter() {
        if let Some(other) = outputs.insert(run.output.as_path(), name.as_str()) {
            return Err(SurfiguresError::ConfigError(format!(
                "runs '{other}' and '{name}' share the output {:?}",
                run.output
            )));
        }
        let log = log_path_for(&run.output);
        if let Some(other) = logs.get(&log) {
            return Err(SurfiguresError::ConfigError(format!(
                "runs '{other}' and '{name}' share the log file {log:?}"
            )));
        }
        logs.insert(log, name.as_str());
    }
    Ok(())
}

fn check_patterns(what: &str, patterns: &[String]) -> Result<()> {
    build_globset(patterns)
        .map(|_| ())
        .map_err(|e| SurfiguresError::ConfigError(format!("{what}: {e}")))
}

fn resolve_options(mut options: Options, base_dir: &Path) -> Options {
    // A bare program name is looked up on PATH; anything with a directory
    // part is relative to the config file.
    if options.tool.components().count() > 1 {
        options.tool = resolve(base_dir, &options.tool);
    }
    options.scratch_root = options.scratch_root.map(|root| resolve(base_dir, &root));
    options
}

fn resolve_run(mut run: RunConfig, base_dir: &Path) -> RunConfig {
    run.src = run.src.iter().map(|src| resolve(base_dir, src)).collect();
    run.output = resolve(base_dir, &run.output);
    run
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        normalize(&base_dir.join(path))
    } else {
        normalize(path)
    }
}

/// Lexically drop `.` components. `..` is left alone.
fn normalize(path: &Path) -> PathBuf {
    let normalized: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

