// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Foreground supervision specs

use crate::prelude::*;
use std::time::{Duration, Instant};

#[test]
fn exit_on_success_stops_after_first_run() {
    let project = Project::empty();
    let counter = project.path().join("runs");
    let script = format!("echo run >> '{}'", counter.display());

    project.run4ever().args(&["-d", "0", "--exit-on-success", "sh", "-c", &script]).passes();

    assert_eq!(std::fs::read_to_string(&counter).unwrap().lines().count(), 1);
}

#[test]
fn retry_cap_bounds_attempts_and_exits_one() {
    let project = Project::empty();
    let counter = project.path().join("runs");
    let script = format!("echo run >> '{}'; exit 3", counter.display());

    project.run4ever().args(&["-d", "0", "-m", "2", "sh", "-c", &script]).exits(1);

    assert_eq!(std::fs::read_to_string(&counter).unwrap().lines().count(), 3);
}

#[test]
fn timeout_kills_long_attempt() {
    let project = Project::empty();
    let started = Instant::now();

    project.run4ever().args(&["-d", "0", "-m", "0", "-t", "1", "sleep", "10"]).exits(1);

    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(1), "killed early: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(3), "killed late: {elapsed:?}");
}

#[test]
fn child_output_is_inherited() {
    let project = Project::empty();
    project
        .run4ever()
        .args(&["--exit-on-success", "echo", "hello-from-child"])
        .passes()
        .stdout_has("hello-from-child");
}

#[test]
fn ledger_is_empty_after_exit() {
    let project = Project::empty();
    project.run4ever().args(&["--exit-on-success", "true"]).passes();

    project.run4ever().args(&["--list"]).passes().stdout_has("No running jobs found.");
}

#[test]
fn job_is_listed_while_running() {
    let project = Project::empty();
    let ledger = project.ledger();
    let snapshot = project.path().join("snapshot");
    let script = format!("cat '{}' > '{}'", ledger.display(), snapshot.display());

    project
        .run4ever()
        .args(&["--exit-on-success", "sh", "-c", &script, "--password", "hunter2"])
        .passes();

    let seen = std::fs::read_to_string(&snapshot).unwrap();
    assert!(seen.starts_with("Time"));
    assert!(seen.contains("RUNNING"));
    assert!(seen.contains("--password ******"));
    assert!(!seen.contains("hunter2"));
}

#[test]
fn verbose_logs_attempts_to_stderr() {
    let project = Project::empty();
    project
        .run4ever()
        .args(&["-v", "--exit-on-success", "true"])
        .passes()
        .stderr_has("starting attempt");
}
