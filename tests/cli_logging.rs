// tests/cli_logging.rs

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

use surfigures::cli::{CliArgs, LogLevel};
use surfigures::config::default_config_path;
use surfigures::logging::build_filter;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn defaults_when_no_flags_are_given() -> TestResult {
    let args = CliArgs::try_parse_from(["surfigures"])?;

    assert_eq!(args.config, default_config_path());
    assert!(args.runs.is_empty());
    assert_eq!(args.jobs, 1);
    assert_eq!(args.timings, None);
    assert!(args.log_level.is_none());
    assert!(!args.dry_run);

    Ok(())
}

#[test]
fn flags_are_collected() -> TestResult {
    let args = CliArgs::try_parse_from([
        "surfigures",
        "--config",
        "configs/Surfigures.toml",
        "--run",
        "bunny",
        "--run",
        "teapot",
        "-j",
        "3",
        "--timings",
        "timings.toml",
        "--log-level",
        "debug",
        "--dry-run",
    ])?;

    assert_eq!(args.config, PathBuf::from("configs/Surfigures.toml"));
    assert_eq!(args.runs, vec!["bunny", "teapot"]);
    assert_eq!(args.jobs, 3);
    assert_eq!(args.timings, Some(PathBuf::from("timings.toml")));
    assert!(matches!(args.log_level, Some(LogLevel::Debug)));
    assert!(args.dry_run);

    Ok(())
}

#[test]
fn cli_level_overrides_environment() -> TestResult {
    let filter = build_filter(Some(LogLevel::Warn), Some("trace"))?;
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    Ok(())
}

#[test]
fn environment_accepts_per_target_directives() -> TestResult {
    let filter = build_filter(None, Some("surfigures::exec=trace,warn"))?;
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    Ok(())
}

#[test]
fn missing_or_blank_environment_defaults_to_info() -> TestResult {
    assert_eq!(build_filter(None, None)?.max_level_hint(), Some(LevelFilter::INFO));
    assert_eq!(build_filter(None, Some("  "))?.max_level_hint(), Some(LevelFilter::INFO));
    Ok(())
}

#[test]
fn malformed_environment_directives_are_rejected() {
    let err = build_filter(None, Some("surfigures=loud")).unwrap_err();
    assert!(err.to_string().contains("SURFIGURES_LOG"));
}
