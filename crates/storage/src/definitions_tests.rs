// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::os::unix::fs::PermissionsExt;
use tempfile::tempdir;

fn def(parts: &[&str]) -> JobDefinition {
    JobDefinition::new(parts.iter().map(|s| s.to_string()).collect())
}

#[test]
fn missing_file_loads_as_none() {
    let dir = tempdir().unwrap();
    let store = DefinitionStore::new(dir.path().join("jobs.json"));

    assert!(store.load().unwrap().is_none());
}

#[test]
fn empty_file_loads_as_empty_list() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("jobs.json");
    std::fs::write(&path, "\n").unwrap();

    assert_eq!(DefinitionStore::new(path).load().unwrap(), Some(Vec::new()));
}

#[test]
fn save_appends_in_order() {
    let dir = tempdir().unwrap();
    let store = DefinitionStore::new(dir.path().join("jobs.json"));
    let first = def(&["echo", "one"]);
    let mut second = def(&["echo", "two"]);
    second.delay = 3;
    second.telegram_token = Some("123:abc".to_string());

    store.save(&first).unwrap();
    store.save(&second).unwrap();

    assert_eq!(store.load().unwrap(), Some(vec![first, second]));
}

#[test]
fn saved_file_is_owner_only() {
    let dir = tempdir().unwrap();
    let store = DefinitionStore::new(dir.path().join("jobs.json"));

    store.save(&def(&["true"])).unwrap();

    let mode = std::fs::metadata(store.path()).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, DEFINITIONS_FILE_MODE);
}

#[test]
fn saved_file_is_a_json_array() {
    let dir = tempdir().unwrap();
    let store = DefinitionStore::new(dir.path().join("jobs.json"));

    store.save(&def(&["true"])).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
    let array = value.as_array().unwrap();
    assert_eq!(array.len(), 1);
    assert_eq!(array[0]["command"], serde_json::json!(["true"]));
    assert_eq!(array[0]["max_retries"], -1);
}

#[test]
fn malformed_file_fails_load_and_save() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("jobs.json");
    std::fs::write(&path, "[{\"command\": [\"ok\"]}, {not json").unwrap();
    let store = DefinitionStore::new(&path);

    assert!(matches!(store.load(), Err(DefinitionStoreError::Parse { .. })));
    assert!(store.save(&def(&["true"])).is_err());
    // The corrupt file is left for the user to inspect.
    assert!(std::fs::read_to_string(&path).unwrap().contains("not json"));
}
