// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `--restore`: relaunch saved jobs.

use crate::env::StatePaths;
use anyhow::{Context, Result};
use r4e_adapters::ProcessSpawner;
use r4e_storage::DefinitionStore;

pub fn handle(paths: &StatePaths, spawner: &dyn ProcessSpawner) -> Result<()> {
    let exe = std::env::current_exe().context("cannot locate the run4ever executable")?;
    let store = DefinitionStore::new(paths.jobs());
    let summary = r4e_engine::restore(&store, spawner, &exe)
        .context("failed to restore saved jobs")?;

    if summary.is_empty() {
        tracing::info!("no saved jobs found");
        return Ok(());
    }
    tracing::info!(
        started = summary.started.len(),
        total = summary.total,
        failed = summary.failed,
        "restored saved jobs"
    );
    Ok(())
}

#[cfg(test)]
#[path = "restore_tests.rs"]
mod tests;
