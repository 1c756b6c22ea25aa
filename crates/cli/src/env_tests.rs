// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial]
fn state_dir_from_env() {
    std::env::set_var(STATE_DIR_ENV, "/tmp/r4e-state");
    let paths = StatePaths::resolve().unwrap();
    std::env::remove_var(STATE_DIR_ENV);

    assert_eq!(paths.dir, PathBuf::from("/tmp/r4e-state"));
    assert_eq!(paths.ledger(), PathBuf::from("/tmp/r4e-state/run4ever.state"));
    assert_eq!(paths.jobs(), PathBuf::from("/tmp/r4e-state/jobs.json"));
}

#[test]
#[serial]
fn empty_state_dir_env_falls_back_to_home() {
    std::env::set_var(STATE_DIR_ENV, "");
    let paths = StatePaths::resolve().unwrap();
    std::env::remove_var(STATE_DIR_ENV);

    assert!(paths.dir.ends_with(".run4ever"));
}

#[test]
#[serial]
fn user_config_follows_xdg() {
    std::env::set_var("XDG_CONFIG_HOME", "/tmp/xdg");
    let files = config_files();
    std::env::remove_var("XDG_CONFIG_HOME");

    assert_eq!(
        files,
        vec![
            PathBuf::from("/etc/run4ever/config.toml"),
            PathBuf::from("/tmp/xdg/run4ever/config.toml"),
        ]
    );
}

#[test]
fn ensure_creates_nested_dir() {
    let dir = tempfile::tempdir().unwrap();
    let paths = StatePaths { dir: dir.path().join("a/b") };

    paths.ensure().unwrap();

    assert!(paths.dir.is_dir());
}
