// tests/orchestrator_run.rs
#![cfg(unix)]

mod common;
use crate::common::init_tracing;
use crate::common::reporter::{CapturingReporter, ReportEvent};
use crate::common::stub::{echo_args_script, entry_count, stub_tool, write_inputs};

use std::error::Error;
use std::fs;

use tempfile::TempDir;

use surfigures::errors::SurfiguresError;
use surfigures::exec::{RunOutcome, run_with_reporter};
use surfigures::{InputSet, run};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn passing_tool_returns_elapsed_and_logs_output() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let inputs = write_inputs(dir.path(), &["a.obj", "b.obj"]);
    let output = dir.path().join("out.obj");
    let options = stub_tool("echo OK; exit 0");
    let reporter = CapturingReporter::new();

    let outcome = run_with_reporter(&InputSet::new(inputs), &output, &options, &reporter)?;

    let elapsed = outcome.elapsed_secs().expect("passing run has an elapsed time");
    assert!(elapsed >= 0.0);
    assert!(outcome.is_passed());
    assert_eq!(outcome.exit_code(), Some(0));

    let log = fs::read_to_string(dir.path().join("out.log"))?;
    assert!(log.contains("OK"));

    let events = reporter.events();
    assert_eq!(events.len(), 2);
    assert!(matches!(&events[0], ReportEvent::Started { command_line, .. } if command_line.contains("out.obj")));
    match &events[1] {
        ReportEvent::Succeeded { message } => {
            assert!(message.contains("a.obj"));
            assert!(message.contains("b.obj"));
            assert!(message.contains("--> "));
            assert!(message.ends_with('s'));
        }
        other => panic!("expected success event, got {other:?}"),
    }
    assert!(reporter.errors().is_empty());

    Ok(())
}

#[test]
fn failing_tool_yields_no_result_but_keeps_log() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let inputs = write_inputs(dir.path(), &["a.obj"]);
    let output = dir.path().join("out.obj");
    let options = stub_tool("echo 'surface is not closed' >&2; exit 2");
    let reporter = CapturingReporter::new();

    let outcome = run_with_reporter(&InputSet::new(inputs), &output, &options, &reporter)?;

    assert_eq!(outcome.elapsed_secs(), None);
    assert!(matches!(outcome, RunOutcome::Failed { exit_code: Some(2), .. }));

    let log_path = dir.path().join("out.log");
    let log = fs::read_to_string(&log_path)?;
    assert!(log.contains("surface is not closed"));

    let errors = reporter.errors();
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ReportEvent::Failed { message, log_file } => {
            assert_eq!(log_file, &log_path);
            assert!(message.contains(&output.display().to_string()));
            assert!(message.contains("--> "));
        }
        other => panic!("expected failure event, got {other:?}"),
    }

    Ok(())
}

#[test]
fn stdout_and_stderr_share_the_log_in_order() -> TestResult {
    let dir = TempDir::new()?;
    let inputs = write_inputs(dir.path(), &["a.obj"]);
    let output = dir.path().join("out.obj");
    let options = stub_tool("echo first; echo second >&2; echo third");

    run(&InputSet::new(inputs), &output, &options)?;

    let log = fs::read_to_string(dir.path().join("out.log"))?;
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines, vec!["first", "second", "third"]);

    Ok(())
}

#[test]
fn existing_log_is_truncated() -> TestResult {
    let dir = TempDir::new()?;
    let inputs = write_inputs(dir.path(), &["a.obj"]);
    let output = dir.path().join("out.obj");
    fs::write(dir.path().join("out.log"), "stale content from a previous run\n")?;

    run(&InputSet::new(inputs), &output, &stub_tool("echo fresh"))?;

    let log = fs::read_to_string(dir.path().join("out.log"))?;
    assert_eq!(log, "fresh\n");

    Ok(())
}

#[test]
fn tool_receives_output_flag_and_sorted_inputs() -> TestResult {
    let dir = TempDir::new()?;
    let inputs = write_inputs(dir.path(), &["b.obj", "a.obj"]);
    let output = dir.path().join("out.obj");

    run(&InputSet::new(inputs), &output, &stub_tool(&echo_args_script(0)))?;

    let log = fs::read_to_string(dir.path().join("out.log"))?;
    let args: Vec<&str> = log.lines().collect();
    let a = dir.path().join("a.obj").display().to_string();
    let b = dir.path().join("b.obj").display().to_string();
    let out = output.display().to_string();
    assert_eq!(args, vec!["-o", out.as_str(), a.as_str(), b.as_str()]);

    Ok(())
}

#[test]
fn elapsed_tracks_subprocess_duration() -> TestResult {
    let dir = TempDir::new()?;
    let inputs = write_inputs(dir.path(), &["a.obj"]);
    let output = dir.path().join("slow.obj");

    let outcome = run(&InputSet::new(inputs), &output, &stub_tool("sleep 1"))?;

    let elapsed = outcome.elapsed_secs().expect("sleep exits 0");
    assert!(
        (0.8..=1.2).contains(&elapsed),
        "expected roughly one second, got {elapsed}"
    );

    Ok(())
}

#[test]
fn scratch_directory_removed_after_success_and_failure() -> TestResult {
    let dir = TempDir::new()?;
    let scratch_root = TempDir::new()?;
    let inputs = write_inputs(dir.path(), &["a.obj", "b.obj"]);

    for (code, output) in [(0, "pass.obj"), (3, "fail.obj")] {
        // Linked inputs live in the scratch directory, so the tool sees it.
        let options = stub_tool(&echo_args_script(code))
            .with_stage(surfigures::types::StageMode::Link)
            .with_scratch_root(scratch_root.path());
        let output = dir.path().join(output);

        let outcome = run(&InputSet::new(inputs.clone()), &output, &options)?;
        assert_eq!(outcome.is_passed(), code == 0);

        let log = fs::read_to_string(output.with_extension("log"))?;
        let staged = log
            .lines()
            .find(|line| line.ends_with("a.obj"))
            .expect("tool saw a.obj");
        assert!(staged.starts_with(&scratch_root.path().display().to_string()));
        assert_eq!(entry_count(scratch_root.path()), 0);
    }

    Ok(())
}

#[test]
fn scratch_directory_removed_when_expansion_fails() -> TestResult {
    let dir = TempDir::new()?;
    let scratch_root = TempDir::new()?;
    let options = stub_tool("exit 0").with_scratch_root(scratch_root.path());
    let missing = InputSet::new([dir.path().join("missing.obj")]);

    let result = run(&missing, &dir.path().join("out.obj"), &options);

    assert!(matches!(result, Err(SurfiguresError::InputError(_))));
    assert_eq!(entry_count(scratch_root.path()), 0);
    assert!(!dir.path().join("out.log").exists());

    Ok(())
}

#[test]
fn missing_executable_is_a_launch_error() -> TestResult {
    let dir = TempDir::new()?;
    let scratch_root = TempDir::new()?;
    let inputs = write_inputs(dir.path(), &["a.obj"]);
    let options = surfigures::Options::new()
        .with_tool("surfigures-test-no-such-tool")
        .with_scratch_root(scratch_root.path());
    let reporter = CapturingReporter::new();

    let result = run_with_reporter(
        &InputSet::new(inputs),
        &dir.path().join("out.obj"),
        &options,
        &reporter,
    );

    match result {
        Err(SurfiguresError::Launch { program, .. }) => {
            assert_eq!(program, "surfigures-test-no-such-tool");
        }
        other => panic!("expected launch error, got {other:?}"),
    }
    assert!(reporter.errors().is_empty());
    assert_eq!(entry_count(scratch_root.path()), 0);

    Ok(())
}

#[test]
fn unwritable_log_location_is_a_log_file_error() -> TestResult {
    let dir = TempDir::new()?;
    let inputs = write_inputs(dir.path(), &["a.obj"]);
    let output = dir.path().join("no-such-dir").join("out.obj");

    let result = run(&InputSet::new(inputs), &output, &stub_tool("exit 0"));

    match result {
        Err(SurfiguresError::LogFile { path, .. }) => {
            assert_eq!(path, dir.path().join("no-such-dir").join("out.log"));
        }
        other => panic!("expected log file error, got {other:?}"),
    }

    Ok(())
}

#[test]
fn output_without_extension_logs_next_to_it() -> TestResult {
    let dir = TempDir::new()?;
    let inputs = write_inputs(dir.path(), &["a.obj"]);
    let output = dir.path().join("result");

    run(&InputSet::new(inputs), &output, &stub_tool("echo done"))?;

    assert_eq!(fs::read_to_string(dir.path().join("result.log"))?, "done\n");

    Ok(())
}
