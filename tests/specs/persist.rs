// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `--persist`, `--restore`, and backgrounding specs

use crate::prelude::*;
use std::os::unix::fs::PermissionsExt;

#[test]
fn persist_saves_definition_with_owner_only_mode() {
    let project = Project::empty();

    project
        .run4ever()
        .args(&["--persist", "-d", "0", "-m", "0", "--exit-on-success", "true"])
        .passes();

    let text = std::fs::read_to_string(project.jobs()).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&text).unwrap();
    let jobs = saved.as_array().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["command"], serde_json::json!(["true"]));
    assert_eq!(jobs[0]["max_retries"], 0);
    assert_eq!(jobs[0]["exit_on_success"], true);

    let mode = std::fs::metadata(project.jobs()).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
}

#[test]
fn persist_appends() {
    let project = Project::empty();
    for _ in 0..2 {
        project.run4ever().args(&["--persist", "--exit-on-success", "true"]).passes();
    }

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(project.jobs()).unwrap()).unwrap();
    assert_eq!(saved.as_array().unwrap().len(), 2);
}

#[test]
fn restore_without_saved_jobs() {
    let project = Project::empty();
    project.run4ever().args(&["--restore"]).passes().stdout_lacks("saved jobs");
    project.run4ever().args(&["-v", "--restore"]).passes().stderr_has("no saved jobs found");
}

#[test]
fn restore_with_malformed_store_fails() {
    let project = Project::empty();
    project.file("state/jobs.json", "[{\"command\": [\"true\"]}, oops]");

    project.run4ever().args(&["--restore"]).exits(1).stderr_has("failed to restore saved jobs");
}

#[test]
fn restore_relaunches_saved_job() {
    let project = Project::empty();
    let marker = project.path().join("restored");
    let script = format!("touch '{}'", marker.display());
    project.file(
        "state/jobs.json",
        &serde_json::json!([{
            "command": ["sh", "-c", script],
            "delay": 0,
            "max_retries": 0,
            "exit_on_success": true
        }])
        .to_string(),
    );

    project
        .run4ever()
        .args(&["-v", "--restore"])
        .passes()
        .stdout_lacks("saved jobs")
        .stderr_has("restored saved jobs");

    assert!(wait_for(10, || marker.exists()));
}

#[test]
fn background_returns_immediately_and_runs_detached() {
    let project = Project::empty();
    let marker = project.path().join("bg-ran");
    let script = format!("touch '{}'", marker.display());

    project
        .run4ever()
        .args(&["-g", "-d", "0", "--exit-on-success", "sh", "-c", &script])
        .passes()
        .stdout_has("Started background process with PID:");

    assert!(wait_for(10, || marker.exists()));
}
