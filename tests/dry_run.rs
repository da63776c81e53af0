// tests/dry_run.rs
#![cfg(unix)]

mod common;
use crate::common::builders::{ConfigFileBuilder, RunConfigBuilder};
use crate::common::stub::{entry_count, write_inputs};

use std::error::Error;

use tempfile::TempDir;

use surfigures::Options;
use surfigures::batch::plan_runs;
use surfigures::render_dry_run;
use surfigures::types::StageMode;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn dry_run_stages_under_configured_scratch_root() -> TestResult {
    let dir = TempDir::new()?;
    let scratch_root = TempDir::new()?;
    write_inputs(dir.path(), &["a.obj", "b.obj"]);

    let cfg = ConfigFileBuilder::new()
        .with_options(
            Options::new()
                .with_stage(StageMode::Copy)
                .with_scratch_root(scratch_root.path()),
        )
        .with_base_dir(dir.path())
        .with_run(
            "pair",
            RunConfigBuilder::new("out/pair.obj").src("a.obj").src("b.obj").build(),
        )
        .build();

    let listing = render_dry_run(&plan_runs(&cfg, &[])?)?;

    let cmd = listing
        .lines()
        .find_map(|line| line.trim().strip_prefix("cmd: "))
        .ok_or("listing has no cmd line")?;
    let root = scratch_root.path().display().to_string();
    assert!(cmd.starts_with("verify_surface_all -o "), "unexpected cmd: {cmd}");
    assert!(cmd.contains(&format!("{root}/surfigures-")), "cmd not staged under {root}: {cmd}");
    assert!(cmd.ends_with("a.obj") || cmd.ends_with("b.obj"));

    assert!(listing.contains("  - pair"));
    assert!(listing.contains("files: 2"));
    assert!(listing.contains("stage: copy"));
    assert!(listing.contains("out/pair.log"));

    // Nothing is left behind and nothing was executed.
    assert_eq!(entry_count(scratch_root.path()), 0);
    assert!(!dir.path().join("out").exists());

    Ok(())
}
