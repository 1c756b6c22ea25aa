// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use r4e_adapters::FakeSpawner;
use r4e_core::JobDefinition;

fn paths() -> (tempfile::TempDir, StatePaths) {
    let dir = tempfile::tempdir().unwrap();
    let paths = StatePaths { dir: dir.path().to_path_buf() };
    (dir, paths)
}

#[test]
fn nothing_saved_is_ok() {
    let (_dir, paths) = paths();
    let spawner = FakeSpawner::new();

    handle(&paths, &spawner).unwrap();

    assert!(spawner.calls().is_empty());
}

#[test]
fn relaunches_current_executable() {
    let (_dir, paths) = paths();
    DefinitionStore::new(paths.jobs())
        .save(&JobDefinition::new(vec!["sleep".into(), "60".into()]))
        .unwrap();
    let spawner = FakeSpawner::new();

    handle(&paths, &spawner).unwrap();

    let calls = spawner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program, std::env::current_exe().unwrap());
    assert_eq!(calls[0].args.first().map(String::as_str), Some("-g"));
}

#[test]
fn malformed_store_is_an_error() {
    let (_dir, paths) = paths();
    std::fs::write(paths.jobs(), "{not json").unwrap();

    let err = handle(&paths, &FakeSpawner::new()).unwrap_err();

    assert!(format!("{err:#}").contains("failed to restore saved jobs"));
}
