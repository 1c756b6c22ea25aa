// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Relaunch saved job definitions as detached supervisors.

use r4e_adapters::ProcessSpawner;
use r4e_storage::{DefinitionStore, DefinitionStoreError};
use std::path::Path;

/// Result of a restore pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreSummary {
    /// Definitions found in the store.
    pub total: usize,
    /// PIDs of the supervisors that started.
    pub started: Vec<u32>,
    /// Definitions whose spawn failed.
    pub failed: usize,
}

impl RestoreSummary {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Spawn `program` once per stored definition, backgrounded.
///
/// A store that fails to parse fails the whole pass before anything is
/// spawned. Spawn failures are per entry: logged, counted, and skipped.
/// Entries are relaunched on every call, including ones already running.
pub fn restore<S>(
    store: &DefinitionStore,
    spawner: &S,
    program: &Path,
) -> Result<RestoreSummary, DefinitionStoreError>
where
    S: ProcessSpawner + ?Sized,
{
    let Some(definitions) = store.load()? else {
        tracing::info!(path = %store.path().display(), "no saved job definitions");
        return Ok(RestoreSummary::default());
    };

    let mut summary = RestoreSummary { total: definitions.len(), ..RestoreSummary::default() };
    for (index, def) in definitions.iter().enumerate() {
        let args = def.restore_args();
        match spawner.spawn_detached(program, &args) {
            Ok(pid) => {
                tracing::info!(index, pid, command = %r4e_core::redacted_line(&def.command[..]), "restored job");
                summary.started.push(pid);
            }
            Err(e) => {
                tracing::error!(index, error = %e, "failed to restore job");
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}

#[cfg(test)]
#[path = "restore_tests.rs"]
mod tests;
