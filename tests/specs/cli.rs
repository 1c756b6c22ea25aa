// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Argument handling specs

use crate::prelude::*;

#[test]
fn help_shows_usage() {
    let project = Project::empty();
    project.run4ever().args(&["--help"]).passes().stdout_has("Usage:").stdout_has("--max-retries");
}

#[test]
fn version_shows_package_version() {
    let project = Project::empty();
    project.run4ever().args(&["--version"]).passes().stdout_has(env!("CARGO_PKG_VERSION"));
}

#[test]
fn no_command_fails() {
    let project = Project::empty();
    project.run4ever().exits(1).stderr_has("No command provided");
}

#[test]
fn invalid_delay_is_a_usage_error() {
    let project = Project::empty();
    project.run4ever().args(&["-d", "soon", "true"]).exits(2);
}

#[test]
fn state_dir_is_created() {
    let project = Project::empty();
    project.run4ever().args(&["--list"]).passes();
    assert!(project.state_dir().is_dir());
}
