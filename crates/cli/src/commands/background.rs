// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `-g` / `-D`: hand the job to a detached copy of ourselves.

use crate::args::Cli;
use anyhow::{Context, Result};
use r4e_adapters::ProcessSpawner;

pub fn handle(cli: &Cli, spawner: &dyn ProcessSpawner) -> Result<()> {
    let exe = std::env::current_exe().context("cannot locate the run4ever executable")?;
    let pid = spawner.spawn_detached(&exe, &cli.background_args())?;
    println!("Started background process with PID: {pid}");
    Ok(())
}

#[cfg(test)]
#[path = "background_tests.rs"]
mod tests;
