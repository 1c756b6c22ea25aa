// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `--list` specs against hand-written ledgers

use crate::prelude::*;

const HEADER: &str = "Time \t\t\t | Job-ID \t\t | PID \t\t | Command \t | Args \t\t | Status";

#[test]
fn empty_ledger_lists_nothing() {
    let project = Project::empty();
    project.run4ever().args(&["-l"]).passes().stdout_has("No running jobs found.");
}

#[test]
fn dead_supervisor_is_listed_stale() {
    let project = Project::empty();
    project.file(
        "state/run4ever.state",
        &format!(
            "{HEADER}\n2026-01-01 10:00:00 \t | deadbeef \t | 2147483646 \t | sleep \t\t | 100 \t\t | RUNNING\n"
        ),
    );

    project
        .run4ever()
        .args(&["--list"])
        .passes()
        .stdout_has("deadbeef")
        .stdout_has("STALE")
        .stdout_lacks("RUNNING");
}

#[test]
fn live_supervisor_stays_running() {
    let project = Project::empty();
    let pid = std::process::id();
    project.file(
        "state/run4ever.state",
        &format!("{HEADER}\n2026-01-01 10:00:00 \t | cafe01 \t | {pid} \t | sleep \t\t | 100 \t\t | RUNNING\n"),
    );

    project.run4ever().args(&["--list"]).passes().stdout_has("cafe01").stdout_has("RUNNING");
}

#[test]
fn malformed_rows_are_skipped() {
    let project = Project::empty();
    project.file(
        "state/run4ever.state",
        &format!("{HEADER}\ngarbage line\n2026-01-01 10:00:00 \t | ok1 \t | 1 \t | true \t\t |  \t\t | STALE\n"),
    );

    project.run4ever().args(&["--list"]).passes().stdout_has("ok1").stdout_lacks("garbage");
}
